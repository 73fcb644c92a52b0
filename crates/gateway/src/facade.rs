//! Gateway facade
//!
//! The single entry point the rest of the application calls. Composes the
//! dispatcher, the credential store, and the renewal coordinator: attach the
//! current access token, send, and on an expiry rejection hand the request
//! to the coordinator and await its resumed outcome. Every other rejection
//! surfaces immediately without renewal involvement.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::coordinator::RenewalCoordinator;
use crate::dispatcher::{DispatchError, Dispatcher};
use crate::error::{GatewayError, GatewayResult};
use crate::renewal::{HttpRenewalClient, RenewalClient};
use crate::request::{ApiResponse, RequestSpec};
use crate::session::signal::SessionEvents;
use crate::session::storage::{KeyringStorage, StorageBackend};
use crate::session::store::CredentialStore;

/// Authenticated request gateway.
///
/// Generic over the renewal client and storage backend so tests can swap in
/// deterministic fakes; production code uses the defaults.
pub struct Gateway<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    dispatcher: Dispatcher,
    store: Arc<CredentialStore<S>>,
    coordinator: RenewalCoordinator<R, S>,
    events: SessionEvents,
}

impl Gateway<HttpRenewalClient, KeyringStorage> {
    /// Create a production gateway: keychain-backed store and HTTP renewal
    /// client, both derived from the configuration. The dispatcher and the
    /// renewal client share one HTTP client (one connection pool).
    ///
    /// # Arguments
    /// * `config` - API base URL and timeout
    /// * `keyring_service` - Keychain service name (e.g. "Neumoapp")
    ///
    /// # Errors
    /// Returns an error if the HTTP client could not be built.
    pub fn with_defaults(config: &GatewayConfig, keyring_service: &str) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build HTTP client: {e}")))?;

        let store = Arc::new(CredentialStore::new(KeyringStorage::new(keyring_service)));
        let renewal_client = HttpRenewalClient::with_client(client.clone(), config);
        let dispatcher = Dispatcher::with_client(client, config);
        Ok(Self::assemble(dispatcher, store, renewal_client))
    }
}

impl<R, S> Gateway<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    /// Create a gateway over an explicit store and renewal client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client could not be built.
    pub fn new(
        config: &GatewayConfig,
        store: Arc<CredentialStore<S>>,
        renewal_client: R,
    ) -> GatewayResult<Self> {
        let dispatcher = Dispatcher::new(config)
            .map_err(|e| GatewayError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::assemble(dispatcher, store, renewal_client))
    }

    fn assemble(dispatcher: Dispatcher, store: Arc<CredentialStore<S>>, renewal_client: R) -> Self {
        let events = SessionEvents::new();
        let coordinator = RenewalCoordinator::new(
            Arc::new(renewal_client),
            Arc::clone(&store),
            dispatcher.clone(),
            events.clone(),
        );

        Self { dispatcher, store, coordinator, events }
    }

    /// Load any persisted session into memory. Call once on startup.
    ///
    /// # Returns
    /// `true` if a persisted session was recovered.
    ///
    /// # Errors
    /// Returns a storage error if the durable backend failed.
    pub async fn initialize(&self) -> GatewayResult<bool> {
        Ok(self.store.load().await?)
    }

    /// Issue one call through the gateway.
    ///
    /// Attaches the current access token for protected requests. A 401 on a
    /// first attempt is treated as credential expiry and handed to the
    /// renewal coordinator; the caller is resumed with the replay's outcome
    /// once renewal settles. A 401 on anything else — a replay, or an
    /// unauthenticated request such as a login — surfaces without renewal.
    ///
    /// # Errors
    /// See [`GatewayError`] for the full taxonomy.
    pub async fn call(&self, spec: RequestSpec) -> GatewayResult<ApiResponse> {
        let token = if spec.requires_auth() {
            Some(self.store.access_token().await.ok_or(GatewayError::NotAuthenticated)?)
        } else {
            None
        };

        let response =
            self.dispatcher.send(&spec, token.as_deref()).await.map_err(|err| match err {
                DispatchError::Network(e) => GatewayError::Network(e.to_string()),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && spec.requires_auth() {
            if spec.is_replay() {
                // Guard against loops; the coordinator maps replay 401s
                // itself, so this path only fires if a caller hand-built a
                // replay spec.
                return Err(GatewayError::Unauthorized);
            }
            debug!(path = %spec.path(), "expiry rejection, deferring to renewal coordinator");
            return self.coordinator.on_expiry_detected(spec).await;
        }

        Err(response.into_rejection())
    }

    /// End the session explicitly (logout).
    ///
    /// Routed through the coordinator's teardown path so a logout can never
    /// race an in-flight renewal's success write. Emits the session-ended
    /// notification if credentials were present.
    ///
    /// # Errors
    /// Returns a storage error if clearing durable state failed.
    pub async fn logout(&self) -> GatewayResult<()> {
        self.coordinator.teardown().await
    }

    /// Whether a session is present (an access token is stored).
    pub async fn is_authenticated(&self) -> bool {
        self.store.is_authenticated().await
    }

    /// Subscribe to the session-ended notification.
    ///
    /// Fired exactly once per session teardown, whether triggered by a
    /// failed renewal or an explicit logout, so unrelated screens can react
    /// independently of which call discovered the expiry.
    #[must_use]
    pub fn subscribe_session_ended(&self) -> broadcast::Receiver<()> {
        self.events.subscribe()
    }

    /// Handle to the credential store (used by the auth service to install
    /// credentials after login and cache the profile).
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.store
    }
}
