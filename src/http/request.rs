use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// The eight methods standardized by the IETF for HTTP/1.1. Anything else
/// on the request line is rejected during parsing. Semantics beyond the
/// token itself are left to the registered handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
}

impl Method {
    /// Parses an HTTP method from its request-line token (case-sensitive).
    ///
    /// # Example
    ///
    /// ```
    /// # use emberweb::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "CONNECT" => Some(Method::CONNECT),
            "OPTIONS" => Some(Method::OPTIONS),
            "TRACE" => Some(Method::TRACE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Built from the request line by [`crate::http::parser::parse_request_line`];
/// header fields are appended while the engine reads the header block, after
/// which the request is handed to the handler immutably.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, ...)
    pub method: Method,
    /// The raw request URL, including the query string (if any)
    pub url: String,
    /// The path component of the URL, query stripped
    pub path: String,
    /// The raw query string, or "" when the URL carries none
    pub query: String,
    /// HTTP version number with the "HTTP/" prefix stripped (e.g. "1.1")
    pub version: String,
    /// Key-value pairs decoded from the query string
    pub parameters: HashMap<String, String>,
    /// Header fields, names as received (no case normalization), values trimmed
    pub header: HashMap<String, String>,
}

impl Request {
    /// Looks up a query parameter by key.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(|v| v.as_str())
    }

    /// Records one header field. A repeated name keeps the latest value.
    pub fn insert_header(&mut self, name: &str, value: &str) {
        self.header.insert(name.to_string(), value.trim().to_string());
    }
}
