//! Credential store
//!
//! Process-wide holder for the current credential pair, with write-through
//! persistence so a restart recovers the last known session. The store is a
//! dumb holder: it never validates token structure — deciding whether a
//! token is still accepted is the server's job.

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::storage::{
    StorageBackend, StorageError, ACCESS_TOKEN_KEY, PROFILE_KEY, RENEWAL_TOKEN_KEY,
};
use super::types::CredentialPair;

/// Thread-safe credential holder over a durable backend.
///
/// The in-memory copy is authoritative during a session; `set` and `clear`
/// write through to the backend under the same lock, so concurrent callers
/// never observe a half-written pair.
pub struct CredentialStore<S: StorageBackend> {
    backend: S,
    current: RwLock<Option<CredentialPair>>,
}

impl<S: StorageBackend> CredentialStore<S> {
    /// Create a store over the given backend. Call [`load`](Self::load) to
    /// recover a persisted session.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self { backend, current: RwLock::new(None) }
    }

    /// Load the persisted credential pair into memory.
    ///
    /// Should be called on startup. The session is considered authenticated
    /// if and only if an access token is present, irrespective of whether the
    /// server would still accept it.
    ///
    /// # Returns
    /// `true` if a persisted session was recovered.
    ///
    /// # Errors
    /// Returns an error if the backend fails for a reason other than the
    /// entries being absent.
    pub async fn load(&self) -> Result<bool, StorageError> {
        let mut current = self.current.write().await;

        let access = match self.backend.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(StorageError::NotFound) => {
                debug!("no persisted session found");
                *current = None;
                return Ok(false);
            }
            Err(other) => return Err(other),
        };

        let renewal = match self.backend.get(RENEWAL_TOKEN_KEY) {
            Ok(token) => Some(token),
            Err(StorageError::NotFound) => None,
            Err(other) => return Err(other),
        };

        *current = Some(CredentialPair { access, renewal });
        info!("recovered persisted session");
        Ok(true)
    }

    /// Current credential pair, if authenticated.
    pub async fn get(&self) -> Option<CredentialPair> {
        self.current.read().await.clone()
    }

    /// Current access token, if authenticated.
    pub async fn access_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|pair| pair.access.clone())
    }

    /// Current renewal token, if one was issued.
    pub async fn renewal_token(&self) -> Option<String> {
        self.current.read().await.as_ref().and_then(|pair| pair.renewal.clone())
    }

    /// Whether a session is present.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Atomically overwrite the credential pair and persist it.
    ///
    /// # Errors
    /// Returns an error if persistence fails; the in-memory pair is updated
    /// regardless, so the session stays usable until restart.
    pub async fn set(&self, pair: CredentialPair) -> Result<(), StorageError> {
        let mut current = self.current.write().await;

        let persisted = self.persist(&pair);
        *current = Some(pair);
        drop(current);

        debug!("credential pair replaced");
        persisted
    }

    fn persist(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        self.backend.set(ACCESS_TOKEN_KEY, &pair.access)?;
        match &pair.renewal {
            Some(renewal) => self.backend.set(RENEWAL_TOKEN_KEY, renewal),
            None => self.backend.remove(RENEWAL_TOKEN_KEY),
        }
    }

    /// Clear the session: credentials and cached profile, in memory and in
    /// the backend. Idempotent.
    ///
    /// # Returns
    /// `true` if credentials were present before the clear, which is what
    /// lets the teardown path fire its notification exactly once.
    ///
    /// # Errors
    /// Returns an error if the backend fails; the in-memory state is cleared
    /// regardless.
    pub async fn clear(&self) -> Result<bool, StorageError> {
        let mut current = self.current.write().await;
        let was_authenticated = current.is_some();
        *current = None;

        self.backend.remove(ACCESS_TOKEN_KEY)?;
        self.backend.remove(RENEWAL_TOKEN_KEY)?;
        self.backend.remove(PROFILE_KEY)?;
        drop(current);

        if was_authenticated {
            info!("session credentials cleared");
        }
        Ok(was_authenticated)
    }

    /// Cache the user profile as an opaque JSON document.
    ///
    /// # Errors
    /// Returns an error if persistence fails.
    pub fn cache_profile(&self, profile_json: &str) -> Result<(), StorageError> {
        self.backend.set(PROFILE_KEY, profile_json)
    }

    /// Read the cached user profile, if any.
    ///
    /// # Errors
    /// Returns an error if the backend fails for a reason other than the
    /// entry being absent.
    pub fn cached_profile(&self) -> Result<Option<String>, StorageError> {
        match self.backend.get(PROFILE_KEY) {
            Ok(json) => Ok(Some(json)),
            Err(StorageError::NotFound) => Ok(None),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the credential store.
    use super::*;
    use crate::session::storage::MemoryStorage;

    fn store_with_backend() -> (CredentialStore<MemoryStorage>, MemoryStorage) {
        let backend = MemoryStorage::new();
        (CredentialStore::new(backend.clone()), backend)
    }

    /// Validates `CredentialStore::set` write-through persistence.
    ///
    /// Assertions:
    /// - Confirms the pair is readable in memory.
    /// - Confirms both tokens landed in the backend.
    #[tokio::test]
    async fn set_persists_both_tokens() {
        let (store, backend) = store_with_backend();
        store
            .set(CredentialPair::new("A1", Some("R1".to_string())))
            .await
            .expect("set should persist");

        assert!(store.is_authenticated().await);
        assert_eq!(store.access_token().await.as_deref(), Some("A1"));
        assert_eq!(backend.get(ACCESS_TOKEN_KEY).expect("access persisted"), "A1");
        assert_eq!(backend.get(RENEWAL_TOKEN_KEY).expect("renewal persisted"), "R1");
    }

    /// Validates that a pair without a renewal token removes the stale entry.
    ///
    /// Assertions:
    /// - Ensures the old renewal token is gone from the backend.
    #[tokio::test]
    async fn set_without_renewal_removes_stale_entry() {
        let (store, backend) = store_with_backend();
        store.set(CredentialPair::new("A1", Some("R1".to_string()))).await.expect("set");
        store.set(CredentialPair::new("A2", None)).await.expect("set");

        assert!(matches!(backend.get(RENEWAL_TOKEN_KEY), Err(StorageError::NotFound)));
        assert_eq!(store.renewal_token().await, None);
    }

    /// Validates `CredentialStore::load` restart recovery.
    ///
    /// Assertions:
    /// - Confirms a persisted pair is recovered by a fresh store.
    /// - Ensures an empty backend loads as unauthenticated.
    #[tokio::test]
    async fn load_recovers_persisted_session() {
        let backend = MemoryStorage::new();
        backend.set(ACCESS_TOKEN_KEY, "A1").expect("seed access");
        backend.set(RENEWAL_TOKEN_KEY, "R1").expect("seed renewal");

        let store = CredentialStore::new(backend.clone());
        assert!(store.load().await.expect("load"));
        assert_eq!(
            store.get().await,
            Some(CredentialPair::new("A1", Some("R1".to_string())))
        );

        let empty = CredentialStore::new(MemoryStorage::new());
        assert!(!empty.load().await.expect("load"));
        assert!(!empty.is_authenticated().await);
    }

    /// Validates `CredentialStore::clear` idempotency and reporting.
    ///
    /// Assertions:
    /// - Confirms the first clear reports credentials were present.
    /// - Ensures a second clear reports nothing to remove.
    /// - Confirms the cached profile is removed as part of the clear.
    #[tokio::test]
    async fn clear_is_idempotent_and_reports_presence() {
        let (store, backend) = store_with_backend();
        store.set(CredentialPair::new("A1", Some("R1".to_string()))).await.expect("set");
        store.cache_profile("{\"id\":1}").expect("cache profile");

        assert!(store.clear().await.expect("first clear"));
        assert!(!store.clear().await.expect("second clear"));
        assert!(!store.is_authenticated().await);
        assert!(matches!(backend.get(PROFILE_KEY), Err(StorageError::NotFound)));
    }

    /// Validates profile caching roundtrip.
    ///
    /// Assertions:
    /// - Confirms the cached document reads back verbatim.
    /// - Ensures a missing profile reads as `None`.
    #[tokio::test]
    async fn profile_cache_roundtrip() {
        let (store, _backend) = store_with_backend();
        assert_eq!(store.cached_profile().expect("read"), None);

        store.cache_profile("{\"document_number\":\"12345678\"}").expect("cache");
        assert_eq!(
            store.cached_profile().expect("read").as_deref(),
            Some("{\"document_number\":\"12345678\"}")
        );
    }
}
