//! Diagnostic events emitted by the writer and the sinks that receive them.
//!
//! The writer never owns a global logging destination. Callers that want
//! diagnostics inject a [`DiagnosticSink`]; the default production sink
//! forwards to the [`log`] facade at WARN level. Diagnostics are strictly a
//! side channel: recording an event never changes control flow or the value
//! returned to the caller.

use std::{fmt, io};

/// A single diagnostic event describing a transport failure.
#[derive(Debug)]
pub enum DiagnosticEvent<'a> {
    /// A write failed partway through a payload.
    WriteFailed {
        /// Remote address the writer is configured for.
        addr: &'a str,
        /// Full payload length the writer attempted to send.
        expected: usize,
        /// Bytes the transport accepted before the failure.
        written: usize,
        /// Error reported by the transport.
        error: &'a io::Error,
    },
    /// The cleanup close that follows a failed write itself failed.
    CleanupFailed {
        /// Remote address the writer is configured for.
        addr: &'a str,
        /// Error reported while closing the socket.
        error: &'a io::Error,
    },
}

impl fmt::Display for DiagnosticEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::WriteFailed {
                addr,
                expected,
                written,
                error,
            } => write!(
                f,
                "error while writing data to {addr}: expected to write {expected}, actually wrote {written}: {error}"
            ),
            DiagnosticEvent::CleanupFailed { addr, error } => write!(
                f,
                "subsequent error cleaning up the connection to {addr}: {error}"
            ),
        }
    }
}

/// Sink receiving diagnostic events from a writer.
///
/// Implementations must not block for long; the writer records events
/// synchronously on the calling thread.
pub trait DiagnosticSink: Send {
    /// Record one diagnostic event.
    fn record(&self, event: DiagnosticEvent<'_>);
}

/// Default sink appending events to the [`log`] facade at WARN level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: DiagnosticEvent<'_>) {
        log::warn!("UdpLogWriter: {event}");
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;
    use serial_test::serial;

    use super::{DiagnosticEvent, DiagnosticSink, LogSink};

    #[rstest]
    fn write_failed_display_names_counts() {
        let error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe gone");
        let event = DiagnosticEvent::WriteFailed {
            addr: "127.0.0.1:9999",
            expected: 64,
            written: 12,
            error: &error,
        };
        let rendered = event.to_string();
        assert!(rendered.contains("127.0.0.1:9999"));
        assert!(rendered.contains("expected to write 64"));
        assert!(rendered.contains("actually wrote 12"));
        assert!(rendered.contains("pipe gone"));
    }

    #[rstest]
    #[serial]
    fn log_sink_reaches_log_facade() {
        let mut logger = logtest::Logger::start();
        let error = io::Error::new(io::ErrorKind::NotConnected, "socket closed");
        LogSink.record(DiagnosticEvent::CleanupFailed {
            addr: "127.0.0.1:9999",
            error: &error,
        });
        let record = logger.pop().expect("sink should emit one record");
        assert_eq!(record.level(), log::Level::Warn);
        assert!(record.args().contains("cleaning up the connection"));
    }
}
