//! Outbound request descriptions and raw responses
//!
//! A [`RequestSpec`] captures everything about a call except the credential:
//! method, path, query, body, and extra headers. The credential is attached
//! by the dispatcher at send time, which is what allows the coordinator to
//! replay the same spec under a freshly renewed access token.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};

/// HTTP method subset used by the Neumoapp API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    /// Method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Description of one outbound call, minus the credential.
///
/// The `retry` marker distinguishes a replay (re-issued after renewal) from a
/// first attempt: a replayed request that is rejected again never re-enters
/// the renewal coordinator.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    requires_auth: bool,
    retry: bool,
}

impl RequestSpec {
    /// Create a spec with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            requires_auth: true,
            retry: false,
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Shorthand for a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Shorthand for a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the request as not requiring a credential (login, register,
    /// renewal). A 401 on such a request is surfaced verbatim instead of
    /// triggering renewal.
    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Convert the spec into its replay form (retry marker set).
    pub(crate) fn into_replay(mut self) -> Self {
        self.retry = true;
        self
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Request path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Extra headers (credential header excluded).
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether a stored credential must be attached.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Whether this spec is a replay of an already-renewed request.
    #[must_use]
    pub fn is_replay(&self) -> bool {
        self.retry
    }
}

/// Raw response exposed by the dispatcher: status plus body, nothing more.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Deserialize the body into the expected type.
    ///
    /// # Errors
    /// Returns [`GatewayError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> GatewayResult<T> {
        serde_json::from_str(&self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Convert a non-expiry rejection into its pass-through error, status and
    /// body intact.
    pub(crate) fn into_rejection(self) -> GatewayError {
        GatewayError::Rejected { status: self.status.as_u16(), body: self.body }
    }
}
