//! Session store trait. Conversation histories live here between requests.
//!
//! The core never persists history itself. A request loads the history
//! for its session, hands it to the dispatcher by `&mut`, and saves it
//! back. Stores that serve concurrent requests must serialize that
//! read-modify-write per session.

use async_trait::async_trait;
use crate::error::SessionError;
use crate::message::{ConversationHistory, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Load the history for a session, or a freshly seeded one if the
    /// session has never been seen.
    async fn load(&self, id: &SessionId) -> std::result::Result<ConversationHistory, SessionError>;

    /// Store the history for a session, replacing any previous value.
    async fn save(
        &self,
        id: &SessionId,
        history: ConversationHistory,
    ) -> std::result::Result<(), SessionError>;

    /// Forget a session. Returns whether it existed.
    async fn remove(&self, id: &SessionId) -> std::result::Result<bool, SessionError>;

    /// Number of sessions currently held.
    async fn count(&self) -> std::result::Result<usize, SessionError>;
}
