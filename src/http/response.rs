use std::io::Write;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Returns the reason phrase for a status code.
///
/// Only the codes the server emits itself get real text; anything else a
/// handler chooses to send renders as "NA".
pub fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "NA",
    }
}

/// An HTTP response header block.
///
/// Covers the status line, an optional `Content-Type`, the `Connection`
/// disposition and any extra header fields. The body is never part of a
/// `Response`: callers stream it through the connection after `send`,
/// which must run at most once per request/response cycle.
///
/// # Example
///
/// ```
/// # use emberweb::http::response::Response;
/// let response = Response::new(200)
///     .mimetype("text/html")
///     .header("Cache-Control", "no-cache");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: u16,
    /// MIME type for the `Content-Type` field, omitted when `None`
    pub mimetype: Option<String>,
    /// If true emit `Connection: close`, else `Connection: keep-alive`
    pub close: bool,
    /// Extra header fields, written in insertion order
    pub header: Vec<(String, String)>,
}

impl Response {
    /// Creates a response with the given status, no mime type, and
    /// `Connection: close`.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            mimetype: None,
            close: true,
            header: Vec::new(),
        }
    }

    /// The canned response that upgrades a connection into an event stream.
    pub fn event_stream() -> Self {
        Self::new(200)
            .mimetype("text/event-stream")
            .keep_alive()
            .header("Cache-Control", "no-cache")
    }

    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.close = false;
        self
    }

    /// Appends an extra header field.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header.push((name.into(), value.into()));
        self
    }

    /// Serializes the header block, blank-line terminator included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        let status_line = format!("{} {} {}\r\n", HTTP_VERSION, self.status, reason(self.status));
        buf.extend_from_slice(status_line.as_bytes());

        if let Some(mimetype) = &self.mimetype {
            buf.extend_from_slice(format!("Content-Type: {mimetype}\r\n").as_bytes());
        }

        if self.close {
            buf.extend_from_slice(b"Connection: close\r\n");
        } else {
            buf.extend_from_slice(b"Connection: keep-alive\r\n");
        }

        for (name, value) in &self.header {
            buf.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }

    /// Writes the header block to an async transport and flushes it.
    pub async fn send<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }

    /// Blocking-socket counterpart of [`Response::send`].
    pub fn send_blocking<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}
