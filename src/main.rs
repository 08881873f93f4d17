use emberweb::config::Config;
use emberweb::http::connection::Transport;
use emberweb::http::request::{Method, Request};
use emberweb::http::response::Response;
use emberweb::http::sse::{Event, EventSource};
use emberweb::server::listener::{HandlerFuture, Server};
use emberweb::server::router::Flow;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::io::AsyncWriteExt;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>emberweb</title></head>
<body>
<h1>Server time</h1>
<p id="time">--:--:--</p>
<script>
const source = new EventSource("/api/time");
source.addEventListener("time", (e) => {
  document.getElementById("time").textContent = e.data;
});
</script>
</body>
</html>
"#;

fn root<'a>(conn: &'a mut Transport, _request: &'a Request) -> HandlerFuture<'a> {
    Box::pin(async move {
        Response::new(200).mimetype("text/html").send(conn).await?;
        conn.write_all(INDEX.as_bytes()).await?;
        Ok(Flow::Close)
    })
}

/// Pushes the wall-clock time to the client once per second until the
/// client disconnects, which surfaces as a write error ending the loop.
fn api_time<'a>(conn: &'a mut Transport, _request: &'a Request) -> HandlerFuture<'a> {
    Box::pin(async move {
        let mut events = EventSource::upgrade(conn).await?;
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            events.send(&Event::new(clock()).event("time")).await?;
        }
    })
}

/// UTC time of day as HH:MM:SS.
fn clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, (day % 3600) / 60, day % 60)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let mut server = Server::bind(&cfg).await?;
    server.route(Method::GET, "/", root)?;
    server.route(Method::GET, "/api/time", api_time)?;

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
