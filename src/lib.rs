//! udpstash ships structured log messages to a Logstash-style collector
//! over UDP.
//!
//! Each [`UdpLogWriter::log`] call wraps the message in a fixed JSON
//! envelope (timestamp, version, message, host) and sends it as a single
//! datagram, best effort. There is no acknowledgement, batching, or
//! queueing; a failed send closes the socket and returns the error, and
//! the caller decides whether to [`UdpLogWriter::reopen`] and resend.
//!
//! ```no_run
//! use udpstash::UdpLogWriter;
//!
//! # fn main() -> Result<(), udpstash::WriterError> {
//! let mut writer = UdpLogWriter::dial("logs.example.com:9999", true)?;
//! writer.log("service started")?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod envelope;
mod error;
mod writer;

pub use diagnostics::{DiagnosticEvent, DiagnosticSink, LogSink};
pub use envelope::{ENVELOPE_VERSION, format_envelope, local_hostname, timestamp_now};
pub use error::WriterError;
pub use writer::UdpLogWriter;
