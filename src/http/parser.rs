use crate::http::request::{Method, Request};
use std::collections::HashMap;
use std::fmt;

/// Why a request line was rejected. Every variant maps to a 400 response
/// whose body is the `Display` rendering of the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into exactly method, URL and version.
    MalformedRequestLine(String),
    /// The method token is not one of the eight IETF methods.
    UnsupportedMethod(String),
    /// The line is not valid UTF-8.
    Encoding,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedRequestLine(line) => {
                write!(f, "expected 3 elements in request line {line:?}")
            }
            ParseError::UnsupportedMethod(method) => {
                write!(f, "invalid method {method:?} in request line")
            }
            ParseError::Encoding => write!(f, "request line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Decodes a raw request line (trailing CRLF included) into a [`Request`].
///
/// The URL is split on the first `?` into path and query, and the query is
/// decoded into a parameter map. The header map starts empty; the caller
/// fills it while reading the header block. No validation beyond the three
/// checks in [`ParseError`] is performed - values pass through as received.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(line).map_err(|_| ParseError::Encoding)?;

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ParseError::MalformedRequestLine(
            text.trim_end().to_string(),
        ));
    }

    let method = Method::from_str(fields[0])
        .ok_or_else(|| ParseError::UnsupportedMethod(fields[0].to_string()))?;

    let url = fields[1];
    let version = fields[2].strip_prefix("HTTP/").unwrap_or(fields[2]);

    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    };

    Ok(Request {
        method,
        url: url.to_string(),
        path: path.to_string(),
        query: query.to_string(),
        version: version.to_string(),
        parameters: parse_query(query),
        header: HashMap::new(),
    })
}

/// Decodes a query string into key-value pairs.
///
/// Pairs split on `&`, keys from values on the first `=`. A pair without
/// `=` is skipped rather than failing the request, and the first occurrence
/// of a repeated key wins.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut parameters = HashMap::new();

    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            parameters
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    parameters
}
