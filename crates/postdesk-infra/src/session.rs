//! Session providers.

use tokio::sync::watch;
use uuid::Uuid;

use postdesk_core::ports::SessionProvider;

/// A session fixed at construction, for one-shot tools and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSession {
    owner: Option<Uuid>,
}

impl StaticSession {
    pub fn new(owner: Uuid) -> Self {
        Self { owner: Some(owner) }
    }

    pub fn anonymous() -> Self {
        Self { owner: None }
    }
}

impl From<Option<Uuid>> for StaticSession {
    fn from(owner: Option<Uuid>) -> Self {
        Self { owner }
    }
}

impl SessionProvider for StaticSession {
    fn current_owner(&self) -> Option<Uuid> {
        self.owner
    }
}

/// A session that can log in and out, with a subscribable logged-in signal.
pub struct WatchSession {
    owner: watch::Sender<Option<Uuid>>,
}

impl WatchSession {
    pub fn new(owner: Option<Uuid>) -> Self {
        let (owner, _) = watch::channel(owner);
        Self { owner }
    }

    pub fn log_in(&self, owner: Uuid) {
        let previous = self.owner.send_replace(Some(owner));
        tracing::info!(owner_id = %owner, switched = previous.is_some(), "Session logged in");
    }

    pub fn log_out(&self) {
        if self.owner.send_replace(None).is_some() {
            tracing::info!("Session logged out");
        }
    }

    /// Receiver that wakes on every login, logout or switch.
    pub fn subscribe(&self) -> watch::Receiver<Option<Uuid>> {
        self.owner.subscribe()
    }
}

impl Default for WatchSession {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionProvider for WatchSession {
    fn current_owner(&self) -> Option<Uuid> {
        *self.owner.borrow()
    }
}
