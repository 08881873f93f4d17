use crate::blocking::connection::Connection;
use crate::config::Config;
use crate::http::request::{Method, Request};
use crate::server::fault::{self, FaultReport};
use crate::server::router::{Flow, RouteError, Router};
use anyhow::Context;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// A registered request handler for the blocking server.
///
/// Same contract as the async [`crate::server::listener::Handler`]: the
/// handler produces the whole response and signals the connection's fate
/// through [`Flow`].
pub type Handler = Arc<dyn Fn(&mut TcpStream, &Request) -> anyhow::Result<Flow> + Send + Sync>;

/// Stops a serving [`Server`] from another thread.
///
/// Sets the stop flag, then opens a throwaway loopback connection so the
/// blocked `accept` wakes up and observes it.
#[derive(Clone)]
pub struct ShutdownHandle {
    stopping: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    pub fn stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        let _ = TcpStream::connect(self.addr);
    }
}

/// The blocking server: one accept thread, one worker thread per
/// connection.
///
/// Routes are registered between [`Server::bind`] and [`Server::serve`];
/// `serve` consumes the server and freezes the table.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    timeout: Duration,
    router: Router<Handler>,
    stopping: Arc<AtomicBool>,
}

impl Server {
    pub fn bind(config: &Config) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)
            .with_context(|| format!("failed to bind {}", config.listen_addr))?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            timeout: config.timeout,
            router: Router::new(),
            stopping: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stopping: self.stopping.clone(),
            addr: self.local_addr,
        }
    }

    /// Registers a handler for a (method, path) pair. Fails on a duplicate.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut TcpStream, &Request) -> anyhow::Result<Flow> + Send + Sync + 'static,
    {
        self.router.register(method, path, Arc::new(handler))
    }

    /// Accepts connections until stopped or until a handler fault occurs.
    ///
    /// Each connection runs on its own worker thread with the per-read
    /// timeout set on its socket. A worker hitting a handler fault reports
    /// it, raises the stop flag and wakes the accept loop; `serve` then
    /// returns the fault as its error. An explicit [`ShutdownHandle::stop`]
    /// ends the loop with `Ok(())`.
    pub fn serve(self) -> anyhow::Result<()> {
        let Server {
            listener,
            local_addr,
            timeout,
            router,
            stopping,
        } = self;

        let router = Arc::new(router);
        let (fault_tx, fault_rx) = mpsc::channel::<FaultReport>();

        tracing::info!(addr = %local_addr, "HTTP server started");

        loop {
            let (stream, peer) = listener.accept()?;
            if stopping.load(Ordering::SeqCst) {
                break;
            }

            tracing::debug!(%peer, "accepted connection");
            stream.set_read_timeout(Some(timeout))?;

            let router = router.clone();
            let fault_tx = fault_tx.clone();
            let stopping = stopping.clone();

            thread::spawn(move || {
                let connection = match Connection::new(stream, peer, router) {
                    Ok(connection) => connection,
                    Err(error) => {
                        tracing::debug!(%peer, %error, "connection setup failed");
                        return;
                    }
                };

                if let Err(error) = connection.run() {
                    if fault::is_recoverable(&error) {
                        tracing::debug!(%peer, %error, "connection dropped");
                    } else {
                        let _ = fault_tx.send(FaultReport { peer, error });
                        stopping.store(true, Ordering::SeqCst);
                        let _ = TcpStream::connect(local_addr);
                    }
                }
            });
        }

        tracing::info!("HTTP server stopped");

        match fault_rx.try_recv() {
            Ok(report) => {
                tracing::error!(peer = %report.peer, error = ?report.error, "handler fault");
                Err(report
                    .error
                    .context(format!("handler fault from {}", report.peer)))
            }
            Err(_) => Ok(()),
        }
    }
}
