//! In-memory session store. Histories live as long as the process.

use async_trait::async_trait;
use chatwise_core::error::SessionError;
use chatwise_core::message::{ConversationHistory, SessionId};
use chatwise_core::session::SessionStore;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

struct StoredSession {
    history: ConversationHistory,
    last_touched: u64,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<SessionId, StoredSession>,
    /// Session ids ordered by their last save; the first entry is evicted next.
    by_tick: BTreeMap<u64, SessionId>,
    tick: u64,
}

/// A session store that keeps histories in a HashMap.
///
/// Holds at most `max_sessions` histories; saving a new session past
/// that evicts the one saved longest ago.
pub struct InMemorySessionStore {
    inner: RwLock<Inner>,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_sessions: max_sessions.max(1),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str { "in_memory" }

    async fn load(&self, id: &SessionId) -> Result<ConversationHistory, SessionError> {
        let inner = self.inner.read().await;
        Ok(inner
            .sessions
            .get(id)
            .map(|s| s.history.clone())
            .unwrap_or_default())
    }

    async fn save(&self, id: &SessionId, history: ConversationHistory) -> Result<(), SessionError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        inner.tick += 1;
        let tick = inner.tick;

        if let Some(existing) = inner.sessions.get(id) {
            inner.by_tick.remove(&existing.last_touched);
        } else if inner.sessions.len() >= self.max_sessions {
            if let Some((_, oldest)) = inner.by_tick.pop_first() {
                debug!(session = %oldest, "Evicting least recently used session");
                inner.sessions.remove(&oldest);
            }
        }

        inner.by_tick.insert(tick, id.clone());
        inner.sessions.insert(
            id.clone(),
            StoredSession {
                history,
                last_touched: tick,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        match inner.sessions.remove(id) {
            Some(stored) => {
                inner.by_tick.remove(&stored.last_touched);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, SessionError> {
        Ok(self.inner.read().await.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatwise_core::message::{GREETING, Message};

    #[tokio::test]
    async fn unknown_session_loads_seeded_history() {
        let store = InMemorySessionStore::default();
        let history = store.load(&SessionId::from("new")).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].text(), GREETING);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_and_reload() {
        let store = InMemorySessionStore::default();
        let id = SessionId::from("abc");

        let mut history = store.load(&id).await.unwrap();
        history.append(Message::user("hello"));
        history.append(Message::assistant("hi!"));
        store.save(&id, history).await.unwrap();

        let reloaded = store.load(&id).await.unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.messages()[2].text(), "hi!");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::default();
        let a = SessionId::from("a");
        let b = SessionId::from("b");

        let mut history = store.load(&a).await.unwrap();
        history.append(Message::user("only in a"));
        store.save(&a, history).await.unwrap();

        assert_eq!(store.load(&b).await.unwrap().len(), 1);
        assert_eq!(store.load(&a).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn evicts_least_recently_saved() {
        let store = InMemorySessionStore::new(2);
        for name in ["one", "two"] {
            store.save(&SessionId::from(name), ConversationHistory::new()).await.unwrap();
        }
        // Touch "one" so "two" becomes the oldest.
        store.save(&SessionId::from("one"), ConversationHistory::new()).await.unwrap();
        store.save(&SessionId::from("three"), ConversationHistory::new()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.remove(&SessionId::from("one")).await.unwrap());
        assert!(!store.remove(&SessionId::from("two")).await.unwrap());
        assert!(store.remove(&SessionId::from("three")).await.unwrap());
    }

    #[tokio::test]
    async fn eviction_order_follows_every_save() {
        let store = InMemorySessionStore::new(3);
        for name in ["a", "b", "c", "a", "b"] {
            store.save(&SessionId::from(name), ConversationHistory::new()).await.unwrap();
        }

        // "c" is now the oldest, then "a".
        store.save(&SessionId::from("d"), ConversationHistory::new()).await.unwrap();
        assert!(!store.remove(&SessionId::from("c")).await.unwrap());
        store.save(&SessionId::from("e"), ConversationHistory::new()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 3);
        assert!(!store.remove(&SessionId::from("a")).await.unwrap());
    }

    #[tokio::test]
    async fn removed_session_frees_its_slot() {
        let store = InMemorySessionStore::new(2);
        for name in ["a", "b"] {
            store.save(&SessionId::from(name), ConversationHistory::new()).await.unwrap();
        }
        assert!(store.remove(&SessionId::from("a")).await.unwrap());

        store.save(&SessionId::from("c"), ConversationHistory::new()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.remove(&SessionId::from("b")).await.unwrap());
        assert!(store.remove(&SessionId::from("c")).await.unwrap());
    }

    #[tokio::test]
    async fn remove_missing_session() {
        let store = InMemorySessionStore::default();
        assert!(!store.remove(&SessionId::from("ghost")).await.unwrap());
    }
}
