use std::time::Duration;

/// Seconds a single line read may take before the connection is dropped.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        let listen_addr =
            std::env::var("LISTEN")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let timeout = std::env::var("TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self { listen_addr, timeout }
    }
}
