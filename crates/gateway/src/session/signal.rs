//! Session-ended notification
//!
//! An explicit observer interface replacing the ambient "event bus" logout
//! broadcast: components that need to react to session teardown subscribe
//! and receive a payload-less event. Only the coordinator's teardown path
//! emits, and it emits at most once per session.

use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CAPACITY: usize = 16;

/// Broadcast handle for session lifecycle events.
///
/// Cloning shares the underlying channel; subscribers created before the
/// event is emitted are guaranteed to observe it.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<()>,
}

impl SessionEvents {
    /// Create a new event channel.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Subscribe to session-ended notifications.
    ///
    /// The event carries no payload; receiving one means the session was torn
    /// down and the application should navigate to its login surface.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Emit the session-ended event. Lagging or absent receivers are not an
    /// error.
    pub(crate) fn notify_session_ended(&self) {
        debug!("emitting session-ended notification");
        let _ = self.tx.send(());
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
