//! Test support utilities
//!
//! Deterministic stand-ins for the gateway's external collaborators, usable
//! by this crate's tests and by downstream crates. The in-memory storage
//! backend lives with the other backends in
//! [`session::storage`](crate::session::storage) and is re-exported here for
//! convenience.

mod mocks;

pub use mocks::MockRenewalClient;

pub use crate::session::storage::MemoryStorage;
