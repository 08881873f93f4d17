//! Blocking-socket server variant.
//!
//! Same wire behavior as the async server, run under a different
//! concurrency discipline: the accept loop lives on one thread and each
//! connection gets a worker thread doing blocking I/O. Per-read timeouts
//! come from `set_read_timeout` on the socket instead of a scheduler, and
//! event streams outlive their handler on dedicated tick threads holding a
//! cloned stream.

pub mod connection;
pub mod server;
pub mod sse;
