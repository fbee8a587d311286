//! Per-id mutation serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Queues mutations that target the same post id.
///
/// Mutations on different ids never wait on each other. Slots are dropped
/// as soon as nobody holds or waits on them.
#[derive(Default)]
pub(crate) struct MutationGate {
    slots: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl MutationGate {
    /// Wait until no other mutation on `id` is in flight.
    pub(crate) async fn acquire(&self, id: Uuid) -> GateGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(id).or_default().clone()
        };
        let permit = slot.lock_owned().await;

        GateGuard {
            gate: self,
            id,
            permit: Some(permit),
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub(crate) struct GateGuard<'a> {
    gate: &'a MutationGate,
    id: Uuid,
    permit: Option<OwnedMutexGuard<()>>,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        // Release first so the strong count below only sees the map and waiters.
        self.permit.take();

        let mut slots = self
            .gate
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slots
            .get(&self.id)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_slot_removed_after_release() {
        let gate = MutationGate::default();
        let id = Uuid::new_v4();

        let guard = gate.acquire(id).await;
        assert_eq!(gate.tracked(), 1);
        drop(guard);
        assert_eq!(gate.tracked(), 0);
    }

    #[tokio::test]
    async fn test_same_id_waits() {
        let gate = MutationGate::default();
        let id = Uuid::new_v4();

        let first = gate.acquire(id).await;
        let second = tokio::time::timeout(Duration::from_millis(20), gate.acquire(id)).await;
        assert!(second.is_err());

        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(20), gate.acquire(id)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_different_ids_do_not_wait() {
        let gate = MutationGate::default();

        let _a = gate.acquire(Uuid::new_v4()).await;
        let b = tokio::time::timeout(Duration::from_millis(20), gate.acquire(Uuid::new_v4())).await;
        assert!(b.is_ok());
    }
}
