//! Harness configuration.

use std::time::Duration;

/// Target and timing configuration for a harness run, supplied once at
/// construction.
///
/// `from_env` reads:
/// - `FTGO_HOST` — target host (default: `"localhost"`)
/// - `FTGO_PORT` — target port (default: `8081`)
/// - `FTGO_MAX_WAIT_SECS` — per-check convergence budget (default: `30`)
/// - `FTGO_POLL_INTERVAL_MS` — retry interval (default: `500`)
/// - `FTGO_RUN_DEADLINE_SECS` — optional whole-run deadline (default: unset)
/// - `FTGO_REQUEST_TIMEOUT_SECS` — per-request timeout (default: `10`)
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub host: String,
    pub port: u16,
    pub max_wait: Duration,
    pub interval: Duration,
    pub run_deadline: Option<Duration>,
    pub request_timeout: Duration,
}

impl HarnessConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults. Read once at startup; nothing consults the environment
    /// mid-run.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("FTGO_HOST").unwrap_or(defaults.host),
            port: std::env::var("FTGO_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            max_wait: std::env::var("FTGO_MAX_WAIT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_wait),
            interval: std::env::var("FTGO_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            run_deadline: std::env::var("FTGO_RUN_DEADLINE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            request_timeout: std::env::var("FTGO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Returns the base URL of the target gateway.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8081,
            max_wait: Duration::from_secs(30),
            interval: Duration::from_millis(500),
            run_deadline: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}
