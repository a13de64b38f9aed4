//! # Chatwise Core
//!
//! Domain types, traits, and error definitions for the Chatwise chat router.
//! This crate has **zero framework dependencies**: it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator (language model, weather service, session store) is
//! defined as a trait here. Implementations live in their respective crates,
//! so the routing pipeline can be tested against hand-written stubs.

pub mod error;
pub mod intent;
pub mod message;
pub mod provider;
pub mod session;
pub mod text;
pub mod weather;

// Re-export key types at crate root for ergonomics
pub use error::{Error, EvalError, ProviderError, Result, SessionError, WeatherError};
pub use intent::{Intent, MathOperands};
pub use message::{ConversationHistory, Message, Role, SessionId};
pub use provider::Provider;
pub use session::SessionStore;
pub use weather::{WeatherReport, WeatherService};
