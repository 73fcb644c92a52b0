//! Durable storage backends for session state
//!
//! The session persists three independent entries so a process restart
//! recovers the last known state: the access token, the renewal token, and
//! the cached user profile. The production backend is the platform keychain
//! (macOS Keychain, Windows Credential Manager, Linux Secret Service) via
//! the `keyring` crate; [`MemoryStorage`] backs tests and environments
//! without a keychain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

/// Durable key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "neumoapp_token";

/// Durable key for the renewal token.
pub const RENEWAL_TOKEN_KEY: &str = "neumoapp_refresh_token";

/// Durable key for the cached user profile (opaque JSON).
pub const PROFILE_KEY: &str = "neumoapp_user";

/// Error type for storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested entry does not exist.
    #[error("entry not found")]
    NotFound,

    /// Backend access failed.
    #[error("storage access failed: {0}")]
    AccessFailed(String),
}

/// Backend for the three durable session entries.
///
/// Implementations are dumb holders: no validation of token structure, each
/// entry independently settable and removable, removal idempotent.
pub trait StorageBackend: Send + Sync {
    /// Persist a value under a key, overwriting any previous value.
    ///
    /// # Errors
    /// Returns [`StorageError::AccessFailed`] if the backend rejects the
    /// write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read a value back.
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] if the key does not exist.
    fn get(&self, key: &str) -> Result<String, StorageError>;

    /// Remove a value (idempotent).
    ///
    /// # Errors
    /// Returns [`StorageError::AccessFailed`] if the backend fails for a
    /// reason other than the key being absent.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Whether a value exists for the key.
    fn exists(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }
}

/// Platform keychain backend.
pub struct KeyringStorage {
    service_name: String,
}

impl KeyringStorage {
    /// Create a backend namespaced under a service name.
    ///
    /// # Arguments
    /// * `service_name` - Keychain service identifier (e.g. "Neumoapp")
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StorageError::AccessFailed(format!("failed to open keychain entry {key}: {e}"))
        })
    }
}

impl StorageBackend for KeyringStorage {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "storing session entry");
        self.entry(key)?.set_password(value).map_err(|e| {
            StorageError::AccessFailed(format!("failed to store entry {key}: {e}"))
        })
    }

    fn get(&self, key: &str) -> Result<String, StorageError> {
        self.entry(key)?.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                StorageError::NotFound
            } else {
                StorageError::AccessFailed(format!("failed to read entry {key}: {e}"))
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "removing session entry");
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                Err(StorageError::AccessFailed(format!("failed to remove entry {key}: {e}")))
            }
        }
    }
}

/// In-memory backend for tests and keychain-less environments.
///
/// Clones share the same underlying map, so a test can hand the store one
/// handle and inspect persisted state through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.data.lock().map_err(|_| StorageError::AccessFailed("storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String, StorageError> {
        self.lock()?.get(key).cloned().ok_or(StorageError::NotFound)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for storage backends.
    use super::*;

    /// Validates `MemoryStorage` roundtrip behaviour.
    ///
    /// Assertions:
    /// - Confirms a stored value reads back.
    /// - Ensures a missing key yields `StorageError::NotFound`.
    #[test]
    fn memory_roundtrip() {
        let storage = MemoryStorage::new();
        storage.set(ACCESS_TOKEN_KEY, "A1").expect("set");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).expect("get"), "A1");
        assert!(matches!(storage.get(RENEWAL_TOKEN_KEY), Err(StorageError::NotFound)));
    }

    /// Validates that removal is idempotent.
    ///
    /// Assertion coverage: ensures repeated removal completes without error.
    #[test]
    fn remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set(PROFILE_KEY, "{}").expect("set");
        storage.remove(PROFILE_KEY).expect("first remove");
        storage.remove(PROFILE_KEY).expect("second remove");
        assert!(!storage.exists(PROFILE_KEY));
    }

    /// Validates that clones share state.
    ///
    /// Assertions:
    /// - Confirms a write through one handle is visible through another.
    #[test]
    fn clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set(ACCESS_TOKEN_KEY, "A1").expect("set");
        assert_eq!(other.get(ACCESS_TOKEN_KEY).expect("get"), "A1");
    }
}
