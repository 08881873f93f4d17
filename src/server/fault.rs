//! Classification of per-connection failures.
//!
//! Transport noise is routine and must not stop the server; a fault raised
//! by handler logic indicates a programming error and is surfaced loudly.
//! Both servers apply the same split: recoverable errors are logged and
//! dropped by the accept loop, everything else travels through the fault
//! channel and ends the serve loop.

use std::io;
use std::net::SocketAddr;

/// A non-recoverable failure escalated from one connection.
#[derive(Debug)]
pub struct FaultReport {
    pub peer: SocketAddr,
    pub error: anyhow::Error,
}

/// True for errors the engine expects from a flaky client: read timeouts
/// and peer disconnects in any of their I/O spellings.
pub fn is_recoverable(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<io::Error>() {
        Some(io_error) => matches!(
            io_error.kind(),
            io::ErrorKind::TimedOut
                | io::ErrorKind::WouldBlock
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
        ),
        None => false,
    }
}
