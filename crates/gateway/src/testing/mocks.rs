//! Mock collaborators for gateway tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::renewal::{RenewalClient, RenewalError};
use crate::session::types::CredentialPair;

/// Scripted renewal client that never touches the network.
///
/// Counts calls and records the renewal tokens it was handed, so tests can
/// assert both the single-flight invariant and which session's token a
/// renewal was issued with. Each call can be held open for a configurable
/// delay so tests can deterministically interleave joiners or a teardown
/// with an in-flight renewal.
pub struct MockRenewalClient {
    result: Result<CredentialPair, ()>,
    delay: Duration,
    calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl MockRenewalClient {
    /// Renewal that immediately succeeds with the given pair.
    #[must_use]
    pub fn succeeding(pair: CredentialPair) -> Self {
        Self::succeeding_after(pair, Duration::ZERO)
    }

    /// Renewal that succeeds with the given pair after holding the call open.
    #[must_use]
    pub fn succeeding_after(pair: CredentialPair, delay: Duration) -> Self {
        Self { result: Ok(pair), delay, calls: AtomicUsize::new(0), tokens: Mutex::new(Vec::new()) }
    }

    /// Renewal that is immediately rejected.
    #[must_use]
    pub fn failing() -> Self {
        Self::failing_after(Duration::ZERO)
    }

    /// Renewal that is rejected after holding the call open.
    #[must_use]
    pub fn failing_after(delay: Duration) -> Self {
        Self { result: Err(()), delay, calls: AtomicUsize::new(0), tokens: Mutex::new(Vec::new()) }
    }

    /// Number of renewal calls issued so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Renewal tokens handed to the client, in call order.
    #[must_use]
    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens.lock().map(|tokens| tokens.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RenewalClient for MockRenewalClient {
    async fn renew(&self, renewal_token: &str) -> Result<CredentialPair, RenewalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.push(renewal_token.to_string());
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.result {
            Ok(pair) => Ok(pair.clone()),
            Err(()) => Err(RenewalError::Rejected {
                status: 401,
                body: r#"{"detail": "invalid refresh token"}"#.to_string(),
            }),
        }
    }
}
