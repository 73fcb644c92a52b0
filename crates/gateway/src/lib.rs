//! # Neumoapp Gateway
//!
//! Authenticated request gateway for the Neumoapp scheduling client: attaches
//! a short-lived credential to every outbound call, detects credential expiry
//! from a server rejection, renews the credential exactly once no matter how
//! many requests are in flight, and replays every affected request
//! transparently.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Gateway      │  Facade: the single entry point (`call`)
//! └────────┬─────────┘
//!          │
//!          ├──► Dispatcher           (one outbound call, bearer attachment)
//!          ├──► RenewalCoordinator   (single-flight renewal + FIFO replay)
//!          │         │
//!          │         ├──► RenewalClient    (dedicated refresh endpoint)
//!          │         └──► CredentialStore  (tokens + profile, persisted)
//!          │                   │
//!          │                   └──► StorageBackend  (platform keychain)
//!          └──► SessionEvents        (session-ended broadcast)
//! ```
//!
//! # Behaviour
//!
//! - **Single-flight renewal**: the first caller to discover an expired
//!   credential issues the one renewal call; concurrent discoverers join its
//!   queue and share the outcome.
//! - **FIFO replay**: once renewal succeeds, queued requests are replayed in
//!   enqueue order under the new access token; one replay's failure never
//!   affects its siblings.
//! - **Uniform teardown**: if renewal itself fails, the session ends — store
//!   cleared, every queued caller rejected with the same session-expired
//!   failure, and one session-ended notification emitted for the whole
//!   application to observe.
//! - **No retry loops**: a replayed request that is rejected again fails
//!   hard; it never re-enters renewal.
//!
//! # Module Organization
//!
//! - [`config`]: base URL, timeout, and endpoint constants
//! - [`request`]: [`RequestSpec`] / [`ApiResponse`]
//! - [`dispatcher`]: single outbound call with bearer attachment
//! - [`renewal`]: the refresh endpoint client behind a trait
//! - [`coordinator`]: the single-flight state machine
//! - [`facade`]: the [`Gateway`] entry point
//! - [`session`]: credential store, durable storage, lifecycle events
//! - [`testing`]: deterministic mocks for tests and downstream crates

pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod facade;
pub mod renewal;
pub mod request;
pub mod session;
pub mod testing;

pub use config::GatewayConfig;
pub use coordinator::RenewalCoordinator;
pub use dispatcher::{DispatchError, Dispatcher};
pub use error::{GatewayError, GatewayResult};
pub use facade::Gateway;
pub use renewal::{HttpRenewalClient, RenewalClient, RenewalError};
pub use request::{ApiResponse, Method, RequestSpec};
pub use session::{
    CredentialPair, CredentialStore, KeyringStorage, MemoryStorage, SessionEvents, StorageBackend,
    StorageError, TokenPayload,
};
