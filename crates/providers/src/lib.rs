//! LLM Provider implementations for Chatwise.
//!
//! All providers implement the `chatwise_core::Provider` trait.
//! [`build_from_config`] selects the backend named in the configuration.

pub mod gemini;
pub mod openai_compat;
pub mod router;

pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
