//! Intent and slot value types.
//!
//! An intent is the single response strategy selected for a message.
//! Slots are the structured values pulled out of the message text for
//! that strategy. Both live for one request only.

use serde::Serialize;

/// The response strategy selected for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Weather,
    Math,
    Joke,
    Time,
    /// Nothing matched; the language model answers.
    Fallback,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Weather => write!(f, "weather"),
            Intent::Math => write!(f, "math"),
            Intent::Joke => write!(f, "joke"),
            Intent::Time => write!(f, "time"),
            Intent::Fallback => write!(f, "fallback"),
        }
    }
}

/// Operands extracted for a math query, tagged by the sub-strategy that
/// will consume them.
#[derive(Debug, Clone, PartialEq)]
pub enum MathOperands {
    Factorial(i64),
    Sqrt(f64),
    Power { base: f64, exponent: f64 },
    /// Cleaned text handed to the expression evaluator.
    RawExpression(String),
}
