//! HTTP protocol implementation.
//!
//! This module implements the subset of HTTP/1.1 the server speaks: a
//! request-line and header parser, response serialization, server-sent
//! events and the per-connection engine that ties them together.
//!
//! # Architecture
//!
//! - **`parser`**: decodes the request line and query string into a [`request::Request`]
//! - **`request`**: HTTP method and request representation
//! - **`response`**: HTTP response header block with builder-style construction
//! - **`sse`**: server-sent event framing and the async event stream upgrade
//! - **`sendfile`**: chunked body transfer with a small fixed buffer
//! - **`connection`**: the async per-connection engine
//!
//! # Connection Engine
//!
//! Each client connection is driven through a state machine:
//!
//! ```text
//!        ┌───────────────────┐
//!        │  ReadRequestLine  │ ← one line, timeout-bounded
//!        └──────┬────────────┘
//!               │ parsed                  invalid
//!               ▼                            ▼
//!        ┌──────────────┐          ┌─────────────────┐
//!        │  ReadHeaders │          │  DrainAndReject │ → 400 + description
//!        └──────┬───────┘          └────────┬────────┘
//!               │ blank line                │
//!               ▼                           │
//!        ┌──────────────┐                   │
//!        │   Dispatch   │ → 404 or handler  │
//!        └──────┬───────┘                   │
//!               ▼                           ▼
//!        ┌─────────────────────────────────────┐
//!        │                Close                │ ← reached on every path
//!        └─────────────────────────────────────┘
//! ```
//!
//! An empty request line, a read timeout or a peer reset all take the
//! silent path to `Close`; only handler logic faults escape the engine.
//! The same machine runs on blocking sockets in [`crate::blocking`].

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod sendfile;
pub mod sse;
