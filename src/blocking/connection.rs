use crate::blocking::server::Handler;
use crate::http::connection::is_blank;
use crate::http::parser::{self, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::server::router::{Flow, Router};
use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;

enum EngineState {
    ReadRequestLine,
    DrainAndReject(ParseError),
    ReadHeaders(Request),
    Dispatch(Request),
    Close,
}

/// Blocking counterpart of [`crate::http::connection::Connection`]: the
/// same engine, driven by blocking reads on a socket whose read timeout
/// the kernel re-applies at every read.
///
/// The engine reads lines through a buffered clone of the stream and hands
/// the unbuffered original to the handler for writing.
pub struct Connection {
    reader: BufReader<TcpStream>,
    stream: TcpStream,
    peer: SocketAddr,
    router: Arc<Router<Handler>>,
    keep_open: bool,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        router: Arc<Router<Handler>>,
    ) -> io::Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            reader,
            stream,
            peer,
            router,
            keep_open: false,
        })
    }

    /// Runs the engine, then closes the connection unless a handler kept
    /// it alive for a background worker holding its own clone.
    pub fn run(mut self) -> anyhow::Result<()> {
        let outcome = self.drive();

        let _ = self.stream.flush();
        if !self.keep_open {
            let _ = self.stream.shutdown(Shutdown::Both);
        }

        outcome
    }

    fn drive(&mut self) -> anyhow::Result<()> {
        let mut state = EngineState::ReadRequestLine;

        'engine: loop {
            state = match state {
                EngineState::ReadRequestLine => {
                    let Some(line) = self.read_line()? else {
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
                    if self.drain_headers()? {
                        let response = Response::new(400).mimetype("text/plain");
                        response.send_blocking(&mut self.stream)?;
                        self.stream.write_all(error.to_string().as_bytes())?;
                    }
                    EngineState::Close
                }

                EngineState::ReadHeaders(mut request) => {
                    loop {
                        let Some(line) = self.read_line()? else {
                            tracing::debug!(peer = %self.peer, "header read timed out");
                            break 'engine;
                        };

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
                            if handler(&mut self.stream, &request)? == Flow::KeepAlive {
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
                            Response::new(404).send_blocking(&mut self.stream)?;
                        }
                    }
                    EngineState::Close
                }

                EngineState::Close => break 'engine,
            };
        }

        Ok(())
    }

    /// Reads one line. `None` means the socket's read timeout elapsed;
    /// EOF yields an empty line.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();

        match self.reader.read_until(b'\n', &mut line) {
            Ok(_) => Ok(Some(line)),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn drain_headers(&mut self) -> io::Result<bool> {
        loop {
            match self.read_line()? {
                Some(line) if is_blank(&line) => return Ok(true),
                Some(_) => continue,
                None => return Ok(false),
            }
        }
    }
}
