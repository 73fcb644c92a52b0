//! API-level error taxonomy
//!
//! Wraps the gateway's transport/session failures and lifts the server's
//! structured rejection bodies (FastAPI's `{"detail": ...}` shape) into a
//! readable variant, so callers can show `detail` without parsing JSON
//! themselves.

use neumoapp_gateway::GatewayError;
use serde::Deserialize;
use thiserror::Error;

/// Result alias for the typed API services.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or session failure from the gateway.
    #[error(transparent)]
    Gateway(GatewayError),

    /// Application rejection with the server's detail message.
    #[error("server rejected the request ({status}): {detail}")]
    Server { status: u16, detail: String },
}

/// Rejection body shape produced by the server for application errors.
#[derive(Deserialize)]
struct RejectionBody {
    detail: String,
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { status, body } => {
                let detail = serde_json::from_str::<RejectionBody>(&body)
                    .map(|parsed| parsed.detail)
                    .unwrap_or(body);
                Self::Server { status, detail }
            }
            other => Self::Gateway(other),
        }
    }
}

impl ApiError {
    /// Whether this failure means the user must authenticate again.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Gateway(err) => err.requires_login(),
            Self::Server { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `detail` extraction from a structured rejection body.
    ///
    /// Assertions:
    /// - Ensures a FastAPI-shaped body surfaces its `detail` string.
    /// - Ensures a non-JSON body is carried verbatim.
    #[test]
    fn rejection_detail_is_lifted() {
        let structured = ApiError::from(GatewayError::Rejected {
            status: 409,
            body: r#"{"detail": "Document number already registered"}"#.to_string(),
        });
        match structured {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 409);
                assert_eq!(detail, "Document number already registered");
            }
            other => panic!("expected server rejection, got {other:?}"),
        }

        let plain = ApiError::from(GatewayError::Rejected {
            status: 500,
            body: "internal error".to_string(),
        });
        match plain {
            ApiError::Server { detail, .. } => assert_eq!(detail, "internal error"),
            other => panic!("expected server rejection, got {other:?}"),
        }
    }

    /// Validates the login-required classification passthrough.
    ///
    /// Assertions:
    /// - Confirms session failures require login and rejections do not.
    #[test]
    fn requires_login_follows_gateway_taxonomy() {
        assert!(ApiError::from(GatewayError::SessionExpired).requires_login());
        assert!(ApiError::from(GatewayError::NotAuthenticated).requires_login());
        assert!(!ApiError::Server { status: 422, detail: String::new() }.requires_login());
    }
}
