//! Built-in capabilities for Chatwise.
//!
//! Tools give the dispatcher the ability to answer without a language
//! model: evaluate arithmetic safely and look up current weather.

pub mod calculator;
pub mod weather_lookup;

pub use calculator::{Number, evaluate};
pub use weather_lookup::OpenWeatherClient;
