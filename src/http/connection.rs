use crate::http::parser::{self, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::server::listener::Handler;
use crate::server::router::{Flow, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;

/// The transport handed to handlers: a buffered stream that reads lines
/// and passes writes through to the socket.
pub type Transport = BufReader<TcpStream>;

enum EngineState {
    ReadRequestLine,
    DrainAndReject(ParseError),
    ReadHeaders(Request),
    Dispatch(Request),
    Close,
}

/// Drives one client connection through a single request/response cycle.
///
/// The engine owns its transport exclusively for its lifetime. Every read
/// is bounded by the configured timeout, re-applied per line; a timeout or
/// an empty request line closes the connection without a response. Errors
/// returned from `run` are classified by the accept loop - transport noise
/// is dropped there, handler faults stop the server.
pub struct Connection {
    transport: Transport,
    peer: SocketAddr,
    router: Arc<Router<Handler>>,
    timeout: Duration,
    keep_open: bool,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        router: Arc<Router<Handler>>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport: BufReader::new(stream),
            peer,
            router,
            timeout,
            keep_open: false,
        }
    }

    /// Runs the engine to completion, then flushes and closes the
    /// transport. Teardown happens on every path, including handler
    /// errors; only the outcome of the exchange is returned.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let outcome = self.drive().await;

        let _ = self.transport.flush().await;
        if !self.keep_open {
            let _ = self.transport.shutdown().await;
        }

        outcome
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        let mut state = EngineState::ReadRequestLine;

        'engine: loop {
            state = match state {
                EngineState::ReadRequestLine => {
                    let Some(line) = self.read_line().await? else {
                        tracing::debug!(peer = %self.peer, "request line timed out");
                        break 'engine;
                    };

                    if is_blank(&line) {
                        tracing::debug!(peer = %self.peer, "empty request line");
                        break 'engine;
                    }

                    tracing::debug!(
                        peer = %self.peer,
                        line = %String::from_utf8_lossy(&line).trim_end(),
                        "request line"
                    );

                    match parser::parse_request_line(&line) {
                        Ok(request) => EngineState::ReadHeaders(request),
                        Err(error) => EngineState::DrainAndReject(error),
                    }
                }

                EngineState::DrainAndReject(error) => {
                    // Discard the header block first; a timeout while
                    // draining closes without any response bytes.
                    if self.drain_headers().await? {
                        let response = Response::new(400).mimetype("text/plain");
                        response.send(&mut self.transport).await?;
                        self.transport
                            .write_all(error.to_string().as_bytes())
                            .await?;
                    }
                    EngineState::Close
                }

                EngineState::ReadHeaders(mut request) => {
                    loop {
                        let Some(line) = self.read_line().await? else {
                            tracing::debug!(peer = %self.peer, "header read timed out");
                            break 'engine;
                        };

                        // EOF yields an empty line and ends the block too.
                        if is_blank(&line) {
                            break;
                        }

                        let text = String::from_utf8_lossy(&line);
                        if let Some((name, value)) = text.split_once(':') {
                            request.insert_header(name, value);
                        }
                    }
                    EngineState::Dispatch(request)
                }

                EngineState::Dispatch(request) => {
                    let handler = self.router.lookup(request.method, &request.path).cloned();

                    match handler {
                        Some(handler) => {
                            if handler(&mut self.transport, &request).await? == Flow::KeepAlive {
                                self.keep_open = true;
                            }
                        }
                        None => {
                            tracing::debug!(
                                peer = %self.peer,
                                method = %request.method,
                                path = %request.path,
                                "no route registered"
                            );
                            Response::new(404).send(&mut self.transport).await?;
                        }
                    }
                    EngineState::Close
                }

                EngineState::Close => break 'engine,
            };
        }

        Ok(())
    }

    /// Reads one line, bounded by the configured timeout. `None` means the
    /// timeout elapsed; EOF yields an empty line.
    async fn read_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();

        match time::timeout(self.timeout, self.transport.read_until(b'\n', &mut line)).await {
            Ok(Ok(_)) => Ok(Some(line)),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }

    /// Reads and discards header lines until the blank terminator.
    /// Returns false when a read timed out before the block ended.
    async fn drain_headers(&mut self) -> std::io::Result<bool> {
        loop {
            match self.read_line().await? {
                Some(line) if is_blank(&line) => return Ok(true),
                Some(_) => continue,
                None => return Ok(false),
            }
        }
    }
}

/// True for the two request-line forms that mean "no request": EOF and a
/// bare line terminator. Also ends a header block.
pub(crate) fn is_blank(line: &[u8]) -> bool {
    matches!(line, [] | [b'\n'] | [b'\r', b'\n'])
}
