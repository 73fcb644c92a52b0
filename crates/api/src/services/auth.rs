//! Authentication service
//!
//! Registration, login, profile, and logout against the `/auth` router.
//! Login installs the credential pair into the gateway's store; the profile
//! fetch caches the raw payload so the account screen can render before the
//! first round-trip after a restart.

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{
    Gateway, GatewayError, HttpRenewalClient, KeyringStorage, RequestSpec, TokenPayload,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::{Patient, PatientCreate};

pub struct AuthService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> AuthService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// Register a new patient account.
    ///
    /// # Errors
    /// Surfaces the server's rejection detail on validation failures (e.g. a
    /// document number that is already registered).
    pub async fn register(&self, patient: &PatientCreate) -> ApiResult<Patient> {
        let body = serde_json::to_value(patient)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        let spec = RequestSpec::post(endpoints::AUTH_REGISTER).with_json(body).unauthenticated();

        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }

    /// Log in with document number and password.
    ///
    /// On success the returned credential pair is installed in the gateway's
    /// store, so subsequent calls are authenticated.
    ///
    /// # Errors
    /// A wrong password surfaces as a server rejection with status 401; it
    /// never enters credential renewal because the request is
    /// unauthenticated.
    pub async fn login(&self, document_number: &str, password: &str) -> ApiResult<TokenPayload> {
        let spec = RequestSpec::post(endpoints::AUTH_LOGIN)
            .with_json(json!({
                "document_number": document_number,
                "password": password,
            }))
            .unauthenticated();

        let response = self.gateway.call(spec).await?;
        let payload: TokenPayload = response.json()?;

        self.gateway
            .credentials()
            .set(payload.clone().into())
            .await
            .map_err(GatewayError::from)?;
        debug!(account = %document_number, "login succeeded, credentials installed");

        Ok(payload)
    }

    /// Fetch the authenticated patient's profile and cache it.
    pub async fn me(&self) -> ApiResult<Patient> {
        let response = self.gateway.call(RequestSpec::get(endpoints::AUTH_ME)).await?;

        // Cache failures are not fatal; the profile was still fetched.
        if let Err(err) = self.gateway.credentials().cache_profile(response.body()) {
            warn!(error = %err, "failed to cache profile");
        }

        Ok(response.json()?)
    }

    /// End the session: clears credentials and the cached profile, and emits
    /// the session-ended notification.
    pub async fn logout(&self) -> ApiResult<()> {
        Ok(self.gateway.logout().await?)
    }

    /// Profile cached by the last successful [`me`](Self::me) call, if any.
    pub fn cached_profile(&self) -> ApiResult<Option<Patient>> {
        let Some(raw) = self.gateway.credentials().cached_profile().map_err(GatewayError::from)?
        else {
            return Ok(None);
        };

        let patient = serde_json::from_str(&raw)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(Some(patient))
    }
}
