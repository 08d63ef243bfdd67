//! Best-effort UDP writer for Logstash-style JSON log envelopes.
//!
//! [`UdpLogWriter`] owns a connected datagram socket targeting one remote
//! collector. Each [`log`](UdpLogWriter::log) call formats the envelope,
//! sends it as a single datagram, and surfaces any transport failure to the
//! caller after closing the socket. There is no queueing, batching, or
//! retry policy: a failed call loses that message unless the caller
//! reopens the writer and resends.
//!
//! The writer is single-threaded by contract. It carries no internal
//! synchronisation, and [`close`](UdpLogWriter::close) must not race an
//! in-flight write on the same instance; callers that share a writer
//! across threads must serialise every operation behind their own lock.


use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket},
};

use crate::{
    diagnostics::{DiagnosticEvent, DiagnosticSink, LogSink},
    envelope,
    error::WriterError,
};

/// Seam over the connected datagram socket.
///
/// Production writers hold a [`UdpSocket`]; unit tests substitute fakes to
/// simulate short writes and mid-write transport failures.
pub(crate) trait Datagram: Send {
    /// Send as much of `buf` as the transport accepts in one datagram.
    fn send(&self, buf: &[u8]) -> io::Result<usize>;

    /// Release the underlying transport handle.
    fn close(&mut self) -> io::Result<()>;
}

impl Datagram for UdpSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        UdpSocket::send(self, buf)
    }

    // Dropping the socket is the only close std exposes, and it cannot
    // fail.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer shipping JSON log envelopes to a remote collector over UDP.
///
/// Lives in one of two states: open (a live connected socket) or closed
/// (no socket, I/O refused). Construction and [`reopen`](Self::reopen)
/// produce the open state; [`close`](Self::close) and any failed write
/// produce the closed state.
pub struct UdpLogWriter {
    addr: String,
    socket: Option<Box<dyn Datagram>>,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl UdpLogWriter {
    /// Resolve `addr` (host:port) and open a connected datagram socket to
    /// it.
    ///
    /// When `enable_logging` is true, transport failures are reported to
    /// the `log` facade at WARN level via [`LogSink`]; otherwise the
    /// writer emits no diagnostics.
    pub fn dial(addr: impl Into<String>, enable_logging: bool) -> Result<Self, WriterError> {
        let sink: Option<Box<dyn DiagnosticSink>> = enable_logging.then(|| {
            Box::new(LogSink) as Box<dyn DiagnosticSink>
        });
        Self::dial_with_sink(addr, sink)
    }

    /// Resolve `addr` and open a writer reporting diagnostics to `sink`.
    ///
    /// Lets callers capture diagnostic events deterministically instead of
    /// routing them through the process-wide `log` facade.
    pub fn dial_with_sink(
        addr: impl Into<String>,
        sink: Option<Box<dyn DiagnosticSink>>,
    ) -> Result<Self, WriterError> {
        let mut writer = Self {
            addr: addr.into(),
            socket: None,
            sink,
        };
        writer.open()?;
        Ok(writer)
    }

    /// The configured remote address.
    pub fn address(&self) -> &str {
        &self.addr
    }

    /// Whether the writer currently holds a live socket.
    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    /// Close the underlying socket.
    ///
    /// Not idempotent: closing an already-closed writer returns
    /// [`WriterError::Close`]. The handle is discarded even when the close
    /// fails, so the writer is treated as closed regardless. Must not be
    /// called while another thread has a write in flight on this writer.
    pub fn close(&mut self) -> Result<(), WriterError> {
        self.teardown().map_err(|source| WriterError::Close {
            addr: self.addr.clone(),
            written: 0,
            source,
        })
    }

    /// Close the current socket, if any, and establish a fresh one to the
    /// same configured address.
    ///
    /// A close failure aborts the reopen and is propagated unchanged. A
    /// writer that is already closed (explicitly, or implicitly after a
    /// failed write) has no socket left to close and goes straight to
    /// opening, so a broken writer can recover without discarding its
    /// configuration.
    pub fn reopen(&mut self) -> Result<(), WriterError> {
        if self.is_open() {
            self.close()?;
        }
        self.open()
    }

    /// Format `message` into the JSON envelope and send it.
    ///
    /// The timestamp is taken from the wall clock and the hostname looked
    /// up fresh on every call; a failed hostname lookup falls back to an
    /// empty string. Returns the number of bytes sent on success.
    pub fn log(&mut self, message: &str) -> Result<usize, WriterError> {
        let payload = envelope::format_envelope(
            &envelope::timestamp_now(),
            message,
            &envelope::local_hostname(),
        );
        self.write(payload.as_bytes())
    }

    /// Send `bytes` to the collector, looping until the transport accepts
    /// the full payload or reports an error.
    ///
    /// On a transport error the writer records a diagnostic, closes its
    /// socket exactly once to reach a known state, and returns the write
    /// error carrying the partial byte count. If that cleanup close itself
    /// fails, the close error is returned instead, still carrying the
    /// partial count. The writer never resends on the caller's behalf.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, WriterError> {
        let expected = bytes.len();
        let Some(socket) = self.socket.as_deref() else {
            return Err(WriterError::Write {
                addr: self.addr.clone(),
                expected,
                written: 0,
                source: closed_error(),
            });
        };

        let (written, error) = send_all(socket, bytes);
        let Some(source) = error else {
            return Ok(written);
        };

        self.record(DiagnosticEvent::WriteFailed {
            addr: &self.addr,
            expected,
            written,
            error: &source,
        });
        match self.teardown() {
            Ok(()) => Err(WriterError::Write {
                addr: self.addr.clone(),
                expected,
                written,
                source,
            }),
            Err(close_source) => {
                self.record(DiagnosticEvent::CleanupFailed {
                    addr: &self.addr,
                    error: &close_source,
                });
                Err(WriterError::Close {
                    addr: self.addr.clone(),
                    written,
                    source: close_source,
                })
            }
        }
    }

    /// Take the socket, if any, and close it.
    ///
    /// The handle is dropped whether or not the close succeeds; after this
    /// call the writer is closed.
    fn teardown(&mut self) -> io::Result<()> {
        match self.socket.take() {
            Some(mut socket) => socket.close(),
            None => Err(closed_error()),
        }
    }

    fn open(&mut self) -> Result<(), WriterError> {
        let remote = self.resolve()?;
        let local: SocketAddr = match remote {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)
            .and_then(|socket| socket.connect(remote).map(|()| socket))
            .map_err(|source| WriterError::Connection {
                addr: self.addr.clone(),
                source,
            })?;
        self.socket = Some(Box::new(socket));
        Ok(())
    }

    fn resolve(&self) -> Result<SocketAddr, WriterError> {
        let mut addrs = self
            .addr
            .to_socket_addrs()
            .map_err(|source| WriterError::AddressResolution {
                addr: self.addr.clone(),
                source,
            })?;
        addrs.next().ok_or_else(|| WriterError::AddressResolution {
            addr: self.addr.clone(),
            source: io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing"),
        })
    }

    fn record(&self, event: DiagnosticEvent<'_>) {
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }
}

impl std::fmt::Debug for UdpLogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpLogWriter")
            .field("addr", &self.addr)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Write-until-complete loop over one datagram socket.
///
/// Keeps offering the unwritten suffix of `bytes` while progress is error
/// free. A short send without an error is not a failure; the loop simply
/// continues from the accepted prefix. Returns the total bytes accepted
/// and the error that stopped the loop, if any.
fn send_all(socket: &dyn Datagram, bytes: &[u8]) -> (usize, Option<io::Error>) {
    let mut written = 0;
    while written < bytes.len() {
        match socket.send(&bytes[written..]) {
            Ok(count) => written += count,
            Err(error) => return (written, Some(error)),
        }
    }
    (written, None)
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "use of closed network connection")
}
