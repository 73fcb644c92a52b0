//! Credential types
//!
//! Tokens are opaque strings. Their expiry is server-defined and not known to
//! the client in advance: the gateway discovers it reactively through a 401
//! rejection, never predictively, so there is no expiry bookkeeping here.

use serde::{Deserialize, Serialize};

/// The access/renewal token pair owned by one session.
///
/// Invariant: an access token belongs to at most one credential generation.
/// Once renewal succeeds the prior access token is permanently retired, even
/// if a request holding it is still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived credential attached to ordinary calls.
    pub access: String,

    /// Longer-lived credential used only to obtain a new access token.
    /// Optional because the server may not issue one (in which case the
    /// first expiry ends the session).
    pub renewal: Option<String>,
}

impl CredentialPair {
    /// Create a pair from its raw tokens.
    #[must_use]
    pub fn new(access: impl Into<String>, renewal: Option<String>) -> Self {
        Self { access: access.into(), renewal }
    }
}

/// Wire shape of the auth endpoints (`/auth/login`, `/auth/refresh`).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPayload {
    /// New access token.
    pub access_token: String,

    /// Rotated renewal token. Absent when the server keeps the old one valid.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Always "bearer" for this API.
    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<TokenPayload> for CredentialPair {
    fn from(payload: TokenPayload) -> Self {
        Self { access: payload.access_token, renewal: payload.refresh_token }
    }
}
