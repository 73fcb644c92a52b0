//! Terminal error taxonomy for the gateway
//!
//! Every failure a caller can observe from [`crate::facade::Gateway::call`]
//! is one of these variants. Lower-level modules (dispatcher, storage,
//! renewal client) keep their own error enums and are mapped into this
//! taxonomy at the facade and coordinator boundaries.

use thiserror::Error;

use crate::session::storage::StorageError;

/// Result alias used throughout the gateway crate.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Terminal failure surfaced to gateway callers.
///
/// The taxonomy mirrors how failures must be handled:
///
/// - [`Network`](Self::Network) never triggers credential renewal and is
///   surfaced immediately; retrying is the caller's choice.
/// - [`SessionExpired`](Self::SessionExpired) is the uniform outcome every
///   queued caller receives when renewal itself fails; the raw renewal error
///   is never exposed, so callers can treat it as "must re-authenticate".
/// - [`Unauthorized`](Self::Unauthorized) is the hard failure for a replayed
///   request that was rejected again; it never re-enters renewal.
/// - [`Rejected`](Self::Rejected) passes every other application rejection
///   through untouched, with status and body intact.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response was obtained from the server.
    #[error("network failure: {0}")]
    Network(String),

    /// A protected call was attempted without a stored credential.
    #[error("not authenticated (no stored credentials)")]
    NotAuthenticated,

    /// The server rejected a replayed request; renewal is not retried.
    #[error("request rejected by the server after credential renewal")]
    Unauthorized,

    /// Credential renewal failed and the session was torn down.
    #[error("session expired, re-authentication required")]
    SessionExpired,

    /// Any non-expiry application rejection, surfaced verbatim.
    #[error("request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Durable credential storage failed.
    #[error("credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// A response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Invariant violation inside the gateway itself.
    #[error("internal gateway error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Whether the failure means the caller must re-authenticate.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotAuthenticated)
    }
}
