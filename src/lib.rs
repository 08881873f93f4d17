//! Emberweb - Minimal HTTP/1.1 Routing Server
//!
//! Core library for request parsing, routing and server-sent events,
//! runnable on a cooperative async scheduler or on blocking sockets.

pub mod blocking;
pub mod config;
pub mod http;
pub mod server;
