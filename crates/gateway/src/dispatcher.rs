//! Request dispatcher
//!
//! Performs a single outbound call, attaching the supplied access token as a
//! bearer credential. The dispatcher never retries and never interprets the
//! response beyond exposing status and body; classification happens in the
//! facade and coordinator. The one distinction it does draw — a transport
//! failure with no response versus a status rejection — is load-bearing for
//! the renewal logic: only status rejections can be expiry-shaped.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::request::{ApiResponse, Method, RequestSpec};

/// Error type for a single dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No response was obtained (connect failure, timeout, aborted body).
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
}

/// Thin wrapper over a shared HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    base_url: String,
}

impl Dispatcher {
    /// Create a dispatcher for the configured base URL, building its own
    /// HTTP client.
    ///
    /// # Errors
    /// Returns the builder error if the TLS backend could not be initialized.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a dispatcher over an existing HTTP client, so the connection
    /// pool can be shared with the renewal client.
    #[must_use]
    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        Self { client, base_url: config.base_url.trim_end_matches('/').to_string() }
    }

    /// Issue one call, attaching `access_token` as a bearer credential when
    /// supplied.
    ///
    /// # Errors
    /// Returns [`DispatchError::Network`] only when no response was obtained;
    /// every status code, including rejections, comes back as an
    /// [`ApiResponse`].
    pub async fn send(
        &self,
        spec: &RequestSpec,
        access_token: Option<&str>,
    ) -> Result<ApiResponse, DispatchError> {
        let url = format!("{}{}", self.base_url, spec.path());

        let mut request = match spec.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !spec.query().is_empty() {
            request = request.query(spec.query());
        }

        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        for (name, value) in spec.headers() {
            request = request.header(name, value);
        }

        if let Some(body) = spec.body() {
            request = request.json(body);
        }

        debug!(
            method = spec.method().as_str(),
            path = %spec.path(),
            replay = spec.is_replay(),
            "dispatching request"
        );

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(path = %spec.path(), status = status.as_u16(), "response received");

        Ok(ApiResponse::new(status, body))
    }
}
