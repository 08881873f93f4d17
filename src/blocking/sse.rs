//! Server-sent event support on blocking sockets.
//!
//! The handler upgrades a clone of its stream and moves the session to a
//! tick thread, keeping the connection alive past the handler's return:
//!
//! ```ignore
//! fn greeting(conn: &mut TcpStream, _request: &Request) -> anyhow::Result<Flow> {
//!     let mut events = EventSource::upgrade(conn.try_clone()?)?;
//!     thread::spawn(move || {
//!         loop {
//!             thread::sleep(Duration::from_secs(5));
//!             if events.send(&Event::new("hello").event("greeting")).is_err() {
//!                 break; // client disconnected, terminate the worker
//!             }
//!         }
//!     });
//!     Ok(Flow::KeepAlive)
//! }
//! ```

use crate::http::response::Response;
use crate::http::sse::Event;
use std::io::{self, Write};
use std::net::{Shutdown, TcpStream};

/// An open event-stream session owning its half of the connection.
///
/// Dropping the session closes the stream; a failed send surfaces the
/// I/O error so the worker loop can terminate.
pub struct EventSource {
    stream: TcpStream,
}

impl EventSource {
    /// Sends the event-stream upgrade response and takes ownership of the
    /// stream.
    pub fn upgrade(mut stream: TcpStream) -> io::Result<Self> {
        Response::event_stream().send_blocking(&mut stream)?;
        Ok(Self { stream })
    }

    /// Writes one frame and flushes it to the client.
    pub fn send(&mut self, event: &Event) -> io::Result<()> {
        self.stream.write_all(&event.to_bytes())?;
        self.stream.flush()
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
