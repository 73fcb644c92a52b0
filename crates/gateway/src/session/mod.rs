//! Session state: credentials, durable storage, lifecycle events
//!
//! A session is the lifetime scope of one credential pair plus the renewal
//! state the coordinator keeps for it. This module owns the credential side:
//!
//! - [`types`]: the opaque [`CredentialPair`] and auth endpoint payloads
//! - [`storage`]: durable backends (platform keychain, in-memory)
//! - [`store`]: the process-wide [`CredentialStore`] with write-through
//!   persistence
//! - [`signal`]: the session-ended notification observers subscribe to

pub mod signal;
pub mod storage;
pub mod store;
pub mod types;

pub use signal::SessionEvents;
pub use storage::{KeyringStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::CredentialStore;
pub use types::{CredentialPair, TokenPayload};
