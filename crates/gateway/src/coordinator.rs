//! Renewal coordinator — single-flight credential renewal
//!
//! Guarantees that at most one renewal call is outstanding to the server at
//! any instant, no matter how many concurrent callers discover an expired
//! credential, and that every caller who joined the in-flight renewal is
//! resumed with a consistent outcome once it settles.
//!
//! The state machine is `idle → in-flight → idle` and nothing else. The
//! first discoverer becomes the leader and issues the one renewal call;
//! later discoverers append to the queue and await their completion handle.
//! On success the store is updated and the queue is replayed in strict FIFO
//! order under the new access token. On failure the session is torn down:
//! store cleared, every queued caller rejected with the uniform
//! session-expired error, and the session-ended notification emitted once.

use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::dispatcher::{DispatchError, Dispatcher};
use crate::error::{GatewayError, GatewayResult};
use crate::renewal::{RenewalClient, RenewalError};
use crate::request::{ApiResponse, RequestSpec};
use crate::session::signal::SessionEvents;
use crate::session::storage::{StorageBackend, StorageError};
use crate::session::store::CredentialStore;
use crate::session::types::CredentialPair;

/// One caller's deferred request, parked while renewal is in flight.
///
/// Resolved exactly once: either with its replay's outcome or with the
/// session-expired failure. The oneshot completion handle makes double
/// resolution unrepresentable.
struct PendingCall {
    spec: RequestSpec,
    generation: u64,
    tx: oneshot::Sender<GatewayResult<ApiResponse>>,
}

/// Renewal state shared by all callers of one session.
///
/// `generation` counts credential generations; it is bumped on every
/// successful renewal and on every teardown, so a renewal that settles after
/// its session was torn down can detect it and discard its result instead of
/// resurrecting retired state.
struct RenewalState {
    in_flight: bool,
    queue: Vec<PendingCall>,
    generation: u64,
}

/// Single-flight renewal coordinator.
///
/// Sole writer of the renewal state, and the sole writer of the credential
/// store during renewal and teardown — logout goes through
/// [`teardown`](Self::teardown) so a concurrent clear can never race an
/// in-flight renewal's success write.
pub struct RenewalCoordinator<R: RenewalClient, S: StorageBackend> {
    renewal_client: Arc<R>,
    store: Arc<CredentialStore<S>>,
    dispatcher: Dispatcher,
    events: SessionEvents,
    state: Mutex<RenewalState>,
}

impl<R: RenewalClient, S: StorageBackend> RenewalCoordinator<R, S> {
    /// Create a coordinator over the session's shared resources.
    pub fn new(
        renewal_client: Arc<R>,
        store: Arc<CredentialStore<S>>,
        dispatcher: Dispatcher,
        events: SessionEvents,
    ) -> Self {
        Self {
            renewal_client,
            store,
            dispatcher,
            events,
            state: Mutex::new(RenewalState { in_flight: false, queue: Vec::new(), generation: 0 }),
        }
    }

    /// Handle an expiry rejection for `spec`.
    ///
    /// Joins the in-flight renewal if one exists, otherwise becomes the
    /// leader and issues exactly one renewal call. Resolves once the renewal
    /// settles and this caller's entry has been replayed or rejected.
    ///
    /// Must not be called with a replay: the facade treats a rejected replay
    /// as a hard failure precisely so this path cannot loop.
    ///
    /// # Errors
    /// [`GatewayError::SessionExpired`] if renewal failed; otherwise the
    /// replay's own outcome.
    pub async fn on_expiry_detected(&self, spec: RequestSpec) -> GatewayResult<ApiResponse> {
        debug_assert!(!spec.is_replay(), "replays never re-enter the coordinator");

        let (tx, rx) = oneshot::channel();
        // The generation and the credential snapshot are taken under the same
        // lock acquisition as leader election, so a teardown (or a teardown
        // plus a fresh login) can never slip in between: the leader only ever
        // renews with the tokens of the session it was elected for.
        let lead = {
            let mut state = self.state.lock().await;
            let generation = state.generation;
            state.queue.push(PendingCall { spec, generation, tx });
            if state.in_flight {
                debug!(queued = state.queue.len(), "joining in-flight renewal");
                None
            } else {
                state.in_flight = true;
                Some((generation, self.store.get().await))
            }
        };

        if let Some((generation, previous)) = lead {
            self.run_renewal(generation, previous).await;
        }

        match rx.await {
            Ok(outcome) => outcome,
            // The queue is always drained before state returns to idle, so a
            // dropped handle would be a coordinator bug.
            Err(_) => Err(GatewayError::Internal("pending request was never resolved".into())),
        }
    }

    /// Tear the session down outside the renewal path (logout).
    ///
    /// Drains any queue with the session-expired failure, clears the store,
    /// and emits the session-ended notification if credentials were present.
    /// Idempotent.
    ///
    /// # Errors
    /// Returns a storage error if clearing the durable entries failed; the
    /// in-memory session is ended regardless.
    pub async fn teardown(&self) -> GatewayResult<()> {
        let (queue, cleared) = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.in_flight = false;
            let queue = std::mem::take(&mut state.queue);
            // Clear while the state lock is held: once the generation is
            // bumped here, no renewal settling concurrently can write the
            // store before the clear lands.
            let cleared = self.store.clear().await;
            (queue, cleared)
        };
        self.conclude(queue, cleared)
    }

    /// Leader path: issue the one renewal call and settle the queue.
    ///
    /// `started_generation` and `previous` were captured under the state lock
    /// at election time.
    async fn run_renewal(&self, started_generation: u64, previous: Option<CredentialPair>) {
        info!("credential expiry detected, starting single-flight renewal");

        let outcome = match previous.as_ref().and_then(|pair| pair.renewal.clone()) {
            Some(token) => self.renewal_client.renew(&token).await,
            None => Err(RenewalError::MissingToken),
        };

        match outcome {
            Ok(renewed) => self.settle_success(started_generation, previous, renewed).await,
            Err(err) => self.settle_failure(started_generation, &err).await,
        }
    }

    async fn settle_success(
        &self,
        started_generation: u64,
        previous: Option<CredentialPair>,
        renewed: CredentialPair,
    ) {
        // The server may rotate the renewal token or keep the old one valid.
        let pair = CredentialPair {
            access: renewed.access,
            renewal: renewed.renewal.or(previous.and_then(|p| p.renewal)),
        };

        let access = pair.access.clone();
        let queue = {
            let mut state = self.state.lock().await;
            if state.generation != started_generation {
                debug!("session torn down during renewal, discarding renewed credentials");
                return;
            }
            state.in_flight = false;
            state.generation += 1;
            // The store write happens under the state lock, in the same
            // critical section as the generation check: a logout that has
            // already drained the session can no longer be trailed by this
            // write resurrecting it.
            if let Err(err) = self.store.set(pair).await {
                warn!(error = %err, "failed to persist renewed credentials");
            }
            std::mem::take(&mut state.queue)
        };

        info!(queued = queue.len(), "credential renewal succeeded, replaying deferred requests");

        // Strict FIFO: each replay is issued and awaited before the next.
        // One entry's failure resolves that entry alone and never blocks or
        // fails its siblings.
        for pending in queue {
            let outcome = self.replay(&pending, &access).await;
            let _ = pending.tx.send(outcome);
        }
    }

    async fn settle_failure(&self, started_generation: u64, err: &RenewalError) {
        let (queue, cleared) = {
            let mut state = self.state.lock().await;
            if state.generation != started_generation {
                debug!("session torn down during renewal, teardown already handled the queue");
                return;
            }
            state.in_flight = false;
            state.generation += 1;
            let queue = std::mem::take(&mut state.queue);
            let cleared = self.store.clear().await;
            (queue, cleared)
        };

        warn!(error = %err, queued = queue.len(), "credential renewal failed, ending session");
        if let Err(teardown_err) = self.conclude(queue, cleared) {
            warn!(error = %teardown_err, "failed to clear durable session state");
        }
    }

    /// Shared teardown epilogue: notify once, reject the queue with the
    /// uniform session-expired failure (never the raw renewal error). The
    /// store clear itself already happened under the state lock.
    fn conclude(
        &self,
        queue: Vec<PendingCall>,
        cleared: Result<bool, StorageError>,
    ) -> GatewayResult<()> {
        for pending in queue {
            let _ = pending.tx.send(Err(GatewayError::SessionExpired));
        }

        match cleared {
            Ok(true) => {
                self.events.notify_session_ended();
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => {
                // The in-memory session is gone either way; the caller may
                // still want to know durable state could be stale.
                self.events.notify_session_ended();
                Err(GatewayError::Storage(err))
            }
        }
    }

    /// Re-issue one deferred request under the freshly renewed access token.
    async fn replay(&self, pending: &PendingCall, access: &str) -> GatewayResult<ApiResponse> {
        let spec = pending.spec.clone().into_replay();
        debug!(
            path = %spec.path(),
            generation = pending.generation,
            "replaying request with renewed credential"
        );

        match self.dispatcher.send(&spec, Some(access)).await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) if response.status() == reqwest::StatusCode::UNAUTHORIZED => {
                // The renewed credential was itself rejected. Hard failure:
                // replays never re-enter the coordinator.
                debug!(path = %spec.path(), "replay rejected again, failing without renewal");
                Err(GatewayError::Unauthorized)
            }
            Ok(response) => Err(response.into_rejection()),
            Err(DispatchError::Network(err)) => Err(GatewayError::Network(err.to_string())),
        }
    }
}
