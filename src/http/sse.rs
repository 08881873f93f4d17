//! Server-sent event support for the async engine.
//!
//! A handler upgrades its connection once, then pushes frames until the
//! client goes away:
//!
//! ```ignore
//! async fn clock<'a>(conn: &'a mut Transport, _request: &'a Request) -> ... {
//!     let mut events = EventSource::upgrade(conn).await?;
//!     loop {
//!         tokio::time::sleep(Duration::from_secs(5)).await;
//!         // a write error here means the client disconnected
//!         events.send(&Event::new("hello").event("greeting")).await?;
//!     }
//! }
//! ```

use crate::http::connection::Transport;
use crate::http::response::Response;
use tokio::io::AsyncWriteExt;

/// One event-stream frame.
///
/// `data` is mandatory; `id`, `event` and `retry` are optional and, when
/// present, precede the data line in that order.
#[derive(Debug, Clone)]
pub struct Event {
    data: String,
    id: Option<String>,
    event: Option<String>,
    retry: Option<u32>,
}

impl Event {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            id: None,
            event: None,
            retry: None,
        }
    }

    /// Sets the event id the client reports back in `Last-Event-ID`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the event type, used for dispatching at the client.
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Sets the client's reconnection interval in milliseconds.
    pub fn retry(mut self, millis: u32) -> Self {
        self.retry = Some(millis);
        self
    }

    /// Serializes the frame. The trailing blank line is what lets the
    /// client's parser delimit events, so it is always emitted.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        if let Some(id) = &self.id {
            buf.extend_from_slice(format!("id: {id}\r\n").as_bytes());
        }
        if let Some(event) = &self.event {
            buf.extend_from_slice(format!("event: {event}\r\n").as_bytes());
        }
        if let Some(retry) = self.retry {
            buf.extend_from_slice(format!("retry: {retry}\r\n").as_bytes());
        }
        buf.extend_from_slice(format!("data: {}\r\n\r\n", self.data).as_bytes());

        buf
    }
}

/// An open event-stream connection to the client.
///
/// Holds no state between sends beyond the borrowed transport. A failed
/// `send` surfaces the I/O error to the handler loop, which is expected
/// to stop; frames are never retried.
pub struct EventSource<'a> {
    transport: &'a mut Transport,
}

impl<'a> EventSource<'a> {
    /// Sends the event-stream upgrade response and binds the stream.
    pub async fn upgrade(transport: &'a mut Transport) -> std::io::Result<EventSource<'a>> {
        Response::event_stream().send(transport).await?;
        Ok(Self { transport })
    }

    /// Writes one frame and flushes it to the client.
    pub async fn send(&mut self, event: &Event) -> std::io::Result<()> {
        self.transport.write_all(&event.to_bytes()).await?;
        self.transport.flush().await
    }
}
