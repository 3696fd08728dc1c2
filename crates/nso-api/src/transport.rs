// Shared transport configuration for building the reqwest::Client.
//
// RESTCONF on NSO's default northbound listener is plain HTTP, so the only
// knobs are the request timeout and the user agent.

use std::time::Duration;

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("nso-restconf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
