//! Async server: route table, accept loop and fault routing.

pub mod fault;
pub mod listener;
pub mod router;
