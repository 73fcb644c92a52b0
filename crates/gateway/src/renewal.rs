//! Credential renewal client
//!
//! The dedicated call that exchanges a renewal token for a fresh credential
//! pair. Behind a trait so the coordinator can be exercised against mock
//! servers and deterministic fakes. Renewal is never retried here: per the
//! error design, any renewal failure — rejection or network — is terminal
//! for the session, and the coordinator handles the teardown.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::session::types::{CredentialPair, TokenPayload};

/// Error type for renewal attempts. All variants are terminal for the
/// session; callers never see these directly, only the uniform
/// session-expired failure the coordinator maps them to.
#[derive(Debug, Error)]
pub enum RenewalError {
    /// The renewal call obtained no response.
    #[error("renewal request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server rejected the renewal token.
    #[error("renewal rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The renewal response could not be parsed.
    #[error("renewal response could not be parsed: {0}")]
    Parse(String),

    /// The session holds no renewal token to exchange.
    #[error("no renewal token available")]
    MissingToken,
}

/// Trait for the renewal call, abstracted for testing.
#[async_trait]
pub trait RenewalClient: Send + Sync {
    /// Exchange a renewal token for a new credential pair.
    ///
    /// # Errors
    /// Any error means the session must end; renewal is never retried.
    async fn renew(&self, renewal_token: &str) -> Result<CredentialPair, RenewalError>;
}

/// Production renewal client posting to the API's refresh endpoint.
#[derive(Debug, Clone)]
pub struct HttpRenewalClient {
    client: Client,
    refresh_url: String,
}

impl HttpRenewalClient {
    /// Create a renewal client from the gateway configuration, building its
    /// own HTTP client.
    ///
    /// # Errors
    /// Returns the builder error if the TLS backend could not be initialized.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a renewal client over an existing HTTP client, sharing the
    /// dispatcher's connection pool.
    #[must_use]
    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        Self { client, refresh_url: config.refresh_url() }
    }
}

#[async_trait]
impl RenewalClient for HttpRenewalClient {
    async fn renew(&self, renewal_token: &str) -> Result<CredentialPair, RenewalError> {
        if renewal_token.is_empty() {
            return Err(RenewalError::MissingToken);
        }

        debug!("issuing credential renewal call");

        let response = self
            .client
            .post(&self.refresh_url)
            .json(&json!({ "refresh_token": renewal_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenewalError::Rejected { status: status.as_u16(), body });
        }

        let payload: TokenPayload =
            response.json().await.map_err(|e| RenewalError::Parse(e.to_string()))?;

        debug!("credential renewal call succeeded");
        Ok(CredentialPair::from(payload))
    }
}
