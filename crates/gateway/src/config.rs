//! Gateway configuration

use std::time::Duration;

/// Default API base URL (development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the dedicated credential renewal endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Connection settings for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the Neumoapp API.
    pub base_url: String,

    /// Per-request timeout applied to ordinary and renewal calls alike.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration for the given base URL with the default
    /// timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL of the renewal endpoint.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), REFRESH_PATH)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
