//! Message and conversation history domain types.
//!
//! These are the value objects that flow through one chat request:
//! the user's text is appended to the history, the dispatcher picks a
//! strategy, and the reply is appended behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting every new conversation starts with.
pub const GREETING: &str = "Hi! Ask me weather, math, jokes, or anything!";

/// A trim only happens once the history grows past this many entries.
pub const TRIM_THRESHOLD: usize = 30;

/// Number of entries kept by a trim.
pub const TRIM_KEEP: usize = 25;

/// Number of trailing entries handed to the language model as context.
pub const CONTEXT_WINDOW: usize = 8;

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The chat assistant
    Assistant,
}

impl Role {
    /// Capitalized label used when rendering a transcript.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single message in a conversation.
///
/// Fields are private so a message cannot change once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a new assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Bounded, append-only log of one conversation.
///
/// Entries are only ever added at the end or dropped from the front by
/// [`trim`](Self::trim). The owner (a session store) hands the history to
/// one request at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Create a history seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    /// Append one entry.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The last `n` entries, oldest first.
    pub fn window(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Drop old entries once the history exceeds [`TRIM_THRESHOLD`],
    /// keeping the newest [`TRIM_KEEP`]. Returns how many were dropped.
    pub fn trim(&mut self) -> usize {
        if self.messages.len() <= TRIM_THRESHOLD {
            return 0;
        }
        let dropped = self.messages.len() - TRIM_KEEP;
        self.messages.drain(..dropped);
        dropped
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_turn(history: &mut ConversationHistory, n: usize) {
        history.append(Message::user(format!("question {n}")));
        history.append(Message::assistant(format!("answer {n}")));
        history.trim();
    }

    #[test]
    fn new_history_is_seeded_with_greeting() {
        let history = ConversationHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].role(), Role::Assistant);
        assert_eq!(history.messages()[0].text(), GREETING);
    }

    #[test]
    fn window_returns_trailing_entries_in_order() {
        let mut history = ConversationHistory::new();
        for n in 0..5 {
            complete_turn(&mut history, n);
        }
        let window = history.window(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].text(), "answer 3");
        assert_eq!(window[1].text(), "question 4");
        assert_eq!(window[2].text(), "answer 4");
    }

    #[test]
    fn window_larger_than_history_returns_everything() {
        let history = ConversationHistory::new();
        assert_eq!(history.window(CONTEXT_WINDOW).len(), 1);
    }

    #[test]
    fn trim_is_noop_at_threshold() {
        let mut history = ConversationHistory::new();
        for n in 0..29 {
            history.append(Message::user(format!("m{n}")));
        }
        assert_eq!(history.len(), TRIM_THRESHOLD);
        assert_eq!(history.trim(), 0);
        assert_eq!(history.len(), TRIM_THRESHOLD);
    }

    #[test]
    fn trim_keeps_newest_entries() {
        let mut history = ConversationHistory::new();
        for n in 0..30 {
            history.append(Message::user(format!("m{n}")));
        }
        assert_eq!(history.len(), 31);
        assert_eq!(history.trim(), 6);
        assert_eq!(history.len(), TRIM_KEEP);
        assert_eq!(history.messages().last().unwrap().text(), "m29");
        assert_eq!(history.messages()[0].text(), "m5");
    }

    #[test]
    fn length_stays_bounded_over_many_turns() {
        let mut history = ConversationHistory::new();
        let mut trimmed_once = false;
        for n in 0..200 {
            history.append(Message::user(format!("question {n}")));
            history.append(Message::assistant(format!("answer {n}")));
            assert!(history.len() <= TRIM_THRESHOLD + 1);
            if history.trim() > 0 {
                trimmed_once = true;
                assert!(history.len() <= TRIM_KEEP);
            }
            if !trimmed_once {
                assert!(history.len() <= TRIM_THRESHOLD);
            }
        }
        assert!(trimmed_once);
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"user\""));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }

    #[test]
    fn role_labels_are_capitalized() {
        assert_eq!(Role::User.label(), "User");
        assert_eq!(Role::Assistant.label(), "Assistant");
    }
}
