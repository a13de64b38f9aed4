//! Per-session request serialization.
//!
//! A request loads a history, mutates it, and saves it back. Two requests
//! for the same session must not interleave those steps, so callers hold
//! the session's guard from load until save. Requests for different
//! sessions never wait on each other.

use chatwise_core::message::SessionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Idle lock entries are pruned once the map grows past this size.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a session.
    pub async fn acquire(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());

            if locks.len() > PRUNE_THRESHOLD {
                // Only the map holds a reference to an idle lock.
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }

            locks.entry(id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of lock entries currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_session_is_exclusive() {
        let locks = Arc::new(SessionLocks::new());
        let id = SessionId::from("s1");

        let guard = locks.acquire(&id).await;

        let locks2 = locks.clone();
        let id2 = id.clone();
        let waiter = tokio::spawn(async move {
            let _guard = locks2.acquire(&id2).await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let _a = locks.acquire(&SessionId::from("a")).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&SessionId::from("b")))
            .await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn idle_entries_are_pruned() {
        let locks = SessionLocks::new();
        for n in 0..=PRUNE_THRESHOLD {
            let _guard = locks.acquire(&SessionId::from(&format!("s{n}"))).await;
        }
        assert_eq!(locks.len(), PRUNE_THRESHOLD + 1);

        let _held = locks.acquire(&SessionId::from("fresh")).await;
        assert_eq!(locks.len(), 1);
    }
}
