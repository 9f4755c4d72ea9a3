//! Client configuration loaded from environment variables.

use std::time::Duration;

/// Where the certification helper lives and how long requests may take.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base HTTP URL of the helper, without a trailing slash.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `CERTHELPER_BASE_URL`     | `http://localhost:8000` |
    /// | `CERTHELPER_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CERTHELPER_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = std::env::var("CERTHELPER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("CERTHELPER_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }

    /// Timeout as a [`Duration`] for the HTTP client builder.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
