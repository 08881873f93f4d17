use crate::http::request::Method;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// What the engine should do with the connection once a handler returns.
///
/// `KeepAlive` tells the engine not to shut the transport down - used by
/// handlers that hand the connection to a background event-stream worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Close,
    KeepAlive,
}

/// Route registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The (method, path) key is already registered.
    Duplicate { method: Method, path: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Duplicate { method, path } => {
                write!(f, "route ({method} {path}) already registered")
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Maps (method, path) pairs to handlers.
///
/// Generic over the handler representation so the async and blocking
/// servers share it. Registration happens before serving starts; once the
/// accept loop owns the table behind an `Arc` it is read-only, so lookups
/// from concurrent connections need no locking.
pub struct Router<H> {
    routes: HashMap<(Method, String), H>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers a handler for a (method, path) pair.
    ///
    /// A duplicate key is a configuration error and fails registration;
    /// the existing handler is left in place.
    pub fn register(&mut self, method: Method, path: &str, handler: H) -> Result<(), RouteError> {
        match self.routes.entry((method, path.to_string())) {
            Entry::Occupied(_) => Err(RouteError::Duplicate {
                method,
                path: path.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(handler);
                Ok(())
            }
        }
    }

    /// Looks up the handler for a (method, path) pair.
    pub fn lookup(&self, method: Method, path: &str) -> Option<&H> {
        self.routes.get(&(method, path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
