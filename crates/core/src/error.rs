//! Error types for the Chatwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. None of these ever
//! reach a chat user directly: the component that detects a failure turns
//! it into a reply sentence.

use thiserror::Error;

/// The top-level error type for all Chatwise operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Arithmetic errors ---
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    // --- Weather collaborator errors ---
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    // --- Language model errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Session store errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the arithmetic evaluator and the math sub-strategies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid character in expression: '{0}'")]
    InvalidCharacters(char),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Domain error: {0}")]
    DomainError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("No weather found for '{0}'")]
    NotFound(String),

    #[error("Weather request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Weather service unavailable: {0}")]
    Unavailable(String),

    #[error("Weather API key is not configured")]
    MissingCredentials,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),
}
