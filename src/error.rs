//! Error kinds surfaced by [`UdpLogWriter`](crate::UdpLogWriter).

use std::io;

use thiserror::Error;

/// Errors returned by writer construction and I/O operations.
///
/// Each variant carries the configured remote address so callers can report
/// which endpoint failed without holding a reference to the writer.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The configured address was malformed or could not be resolved to a
    /// UDP endpoint.
    #[error("failed to resolve {addr}: {source}")]
    AddressResolution {
        addr: String,
        #[source]
        source: io::Error,
    },
    /// The local datagram socket could not be created or connected.
    #[error("failed to open datagram socket for {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },
    /// The transport reported a failure mid-write. `written` counts the
    /// bytes accepted before the failure.
    #[error("write to {addr} failed after {written} of {expected} bytes: {source}")]
    Write {
        addr: String,
        expected: usize,
        written: usize,
        #[source]
        source: io::Error,
    },
    /// Closing the socket failed, either via an explicit close or the
    /// cleanup close that follows a failed write. `written` carries the
    /// bytes accepted by the write that triggered the cleanup; zero for an
    /// explicit close.
    #[error("failed to close socket for {addr}: {source}")]
    Close {
        addr: String,
        written: usize,
        #[source]
        source: io::Error,
    },
}

impl WriterError {
    /// Bytes accepted by the transport before the operation failed.
    ///
    /// Zero for errors raised outside a write.
    pub fn bytes_written(&self) -> usize {
        match self {
            WriterError::Write { written, .. } | WriterError::Close { written, .. } => *written,
            _ => 0,
        }
    }
}
