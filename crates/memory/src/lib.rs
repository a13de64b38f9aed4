//! Session storage for Chatwise.
//!
//! Holds conversation histories between requests and serializes
//! concurrent requests that target the same session.

pub mod in_memory;
pub mod locks;

pub use in_memory::InMemorySessionStore;
pub use locks::SessionLocks;
