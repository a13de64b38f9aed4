//! The Chatwise message pipeline.
//!
//! Each chat message flows through a **Classify → Extract → Respond** cycle:
//!
//! 1. **Classify** the text into one intent with ordered keyword rules
//! 2. **Extract** the slot the intent needs (a city, math operands)
//! 3. **Respond** from a fixed strategy, or hand the message to the
//!    configured language model when nothing else claimed it
//!
//! Classification, extraction, and math are synchronous pure functions.
//! Only the [`Dispatcher`] awaits external collaborators.

pub mod city;
pub mod classifier;
pub mod dispatcher;
pub mod jokes;
pub mod math;

pub use city::extract_city;
pub use classifier::{classify, is_math_query};
pub use dispatcher::Dispatcher;
pub use math::{MathQuery, handle_math, parse_query};
