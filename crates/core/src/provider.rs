//! Provider trait: the abstraction over language-model backends.
//!
//! A Provider receives the recent conversation plus the current user text
//! and returns a free-form reply. The dispatcher only calls it for
//! messages no fixed strategy claimed.
//!
//! Implementations: Gemini, OpenAI-compatible endpoints.

use async_trait::async_trait;
use crate::error::ProviderError;
use crate::message::Message;

/// Instruction line placed at the top of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a friendly, helpful assistant. Be concise but warm.";

/// Render the prompt sent to a completion-style model.
///
/// Each context entry becomes a `Role: text` line. The current user text
/// is appended once more after the context, followed by an open
/// `Assistant:` line for the model to complete.
pub fn render_prompt(context: &[Message], user_text: &str) -> String {
    let transcript = context
        .iter()
        .map(|m| format!("{}: {}", m.role().label(), m.text()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{SYSTEM_INSTRUCTION}\n{transcript}\nUser: {user_text}\nAssistant:")
}

/// The core Provider trait.
///
/// Every LLM backend implements this trait. The dispatcher calls
/// `generate()` without knowing which backend is in use.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Generate a reply for `user_text` given the trailing conversation.
    async fn generate(
        &self,
        context: &[Message],
        user_text: &str,
    ) -> std::result::Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_context_then_user_text() {
        let context = vec![
            Message::assistant("Hi there"),
            Message::user("tell me about rust"),
        ];
        let prompt = render_prompt(&context, "tell me about rust");
        assert_eq!(
            prompt,
            "You are a friendly, helpful assistant. Be concise but warm.\n\
             Assistant: Hi there\n\
             User: tell me about rust\n\
             User: tell me about rust\n\
             Assistant:"
        );
    }

    #[test]
    fn prompt_with_empty_context() {
        let prompt = render_prompt(&[], "hello");
        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with("User: hello\nAssistant:"));
    }
}
