use crate::config::Config;
use crate::http::connection::{Connection, Transport};
use crate::http::request::{Method, Request};
use crate::server::fault::{self, FaultReport};
use crate::server::router::{Flow, RouteError, Router};
use anyhow::Context;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// The boxed future a handler returns, borrowing the transport and request
/// for the duration of the call.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Flow>> + Send + 'a>>;

/// A registered request handler.
///
/// The handler is fully responsible for producing a valid response, status
/// line through body, before returning. The engine only looks at the
/// returned [`Flow`] and at whether the handler failed.
pub type Handler =
    Arc<dyn for<'a> Fn(&'a mut Transport, &'a Request) -> HandlerFuture<'a> + Send + Sync>;

/// The async server: owns the listening socket and the route table.
///
/// Routes are registered between [`Server::bind`] and [`Server::run`];
/// `run` consumes the server, freezing the table for the serving phase.
///
/// # Example
///
/// ```ignore
/// let mut server = Server::bind(&Config::load()).await?;
/// server.route(Method::GET, "/", root)?;
/// server.run().await
/// ```
pub struct Server {
    listener: TcpListener,
    timeout: Duration,
    router: Router<Handler>,
}

impl Server {
    /// Binds the listening socket without starting to accept.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.listen_addr))?;

        Ok(Self {
            listener,
            timeout: config.timeout,
            router: Router::new(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Registers a handler for a (method, path) pair. Fails on a duplicate.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: for<'a> Fn(&'a mut Transport, &'a Request) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        self.router.register(method, path, Arc::new(handler))
    }

    /// Accepts connections until a handler fault occurs, spawning one
    /// engine task per connection.
    ///
    /// Transport-level failures (timeouts, resets) are logged and dropped;
    /// a handler fault stops the accept loop and is returned as the error,
    /// closing the listener with it. In-flight connections get an abrupt
    /// close when the runtime tears their tasks down.
    pub async fn run(self) -> anyhow::Result<()> {
        let Server {
            listener,
            timeout,
            router,
        } = self;

        let router = Arc::new(router);
        let (fault_tx, mut fault_rx) = mpsc::unbounded_channel::<FaultReport>();

        tracing::info!(addr = %listener.local_addr()?, "HTTP server started");

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (socket, peer) = accepted?;
                    tracing::debug!(%peer, "accepted connection");

                    let router = router.clone();
                    let fault_tx = fault_tx.clone();

                    tokio::spawn(async move {
                        let connection = Connection::new(socket, peer, router, timeout);
                        if let Err(error) = connection.run().await {
                            if fault::is_recoverable(&error) {
                                tracing::debug!(%peer, %error, "connection dropped");
                            } else {
                                let _ = fault_tx.send(FaultReport { peer, error });
                            }
                        }
                    });
                }

                Some(report) = fault_rx.recv() => {
                    tracing::error!(
                        peer = %report.peer,
                        error = ?report.error,
                        "handler fault, stopping server"
                    );
                    return Err(report
                        .error
                        .context(format!("handler fault from {}", report.peer)));
                }
            }
        }
    }
}
