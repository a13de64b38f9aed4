//! The dispatcher: one chat message in, one reply out.
//!
//! Flow per message:
//! 1. Append the user text to the history
//! 2. Classify it
//! 3. Run the selected strategy (weather, math, joke, time, fallback)
//! 4. Append the reply and trim the history
//!
//! Collaborator failures never escape: each one is logged and replaced
//! by a reply sentence.

use crate::city::extract_city;
use crate::classifier::classify;
use crate::jokes::random_joke;
use crate::math::handle_math;
use chatwise_core::error::{SessionError, WeatherError};
use chatwise_core::intent::Intent;
use chatwise_core::message::{CONTEXT_WINDOW, ConversationHistory, Message, SessionId};
use chatwise_core::provider::Provider;
use chatwise_core::session::SessionStore;
use chatwise_core::weather::WeatherService;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EMPTY_INPUT_PROMPT: &str = "What would you like to know?";
pub const CITY_PROMPT: &str = "Which city would you like the weather for? (e.g., 'weather in Mumbai')";
pub const NO_PROVIDER_REPLY: &str =
    "I can do weather, math, jokes, and time. Add a Gemini API key for more!";
pub const PROVIDER_FAILED_REPLY: &str = "I'm having trouble thinking right now. Try again?";
pub const EMPTY_PROVIDER_REPLY: &str = "Got a weird reply...";

const TIME_FORMAT: &str = "%B %d, %Y - %I:%M %p";

/// Routes chat messages to a response strategy.
pub struct Dispatcher {
    weather: Arc<dyn WeatherService>,
    provider: Option<Arc<dyn Provider>>,
}

impl Dispatcher {
    pub fn new(weather: Arc<dyn WeatherService>) -> Self {
        Self {
            weather,
            provider: None,
        }
    }

    /// Attach a language model for messages no fixed strategy claims.
    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Answer one message, recording the turn in `history`.
    ///
    /// Blank input is answered without touching the history.
    pub async fn handle(&self, history: &mut ConversationHistory, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return EMPTY_INPUT_PROMPT.to_string();
        }

        history.append(Message::user(text));

        let intent = classify(text);
        let reply = match intent {
            Intent::Weather => self.weather_reply(text).await,
            Intent::Math => handle_math(text),
            Intent::Joke => random_joke().to_string(),
            Intent::Time => local_time_reply(),
            Intent::Fallback => self.fallback_reply(history, text).await,
        };

        history.append(Message::assistant(reply.clone()));
        let dropped = history.trim();
        if dropped > 0 {
            debug!(dropped, kept = history.len(), "Trimmed conversation history");
        }
        reply
    }

    /// Load a session's history, answer `text` against it, and save it back.
    ///
    /// Callers serving concurrent requests must hold the session's lock
    /// around this call.
    pub async fn handle_message(
        &self,
        store: &dyn SessionStore,
        session_id: &SessionId,
        text: &str,
    ) -> Result<String, SessionError> {
        if text.trim().is_empty() {
            return Ok(EMPTY_INPUT_PROMPT.to_string());
        }

        let mut history = store.load(session_id).await?;
        let reply = self.handle(&mut history, text).await;
        store.save(session_id, history).await?;
        Ok(reply)
    }

    async fn weather_reply(&self, text: &str) -> String {
        let Some(city) = extract_city(text) else {
            return CITY_PROMPT.to_string();
        };

        info!(%city, service = self.weather.name(), "Fetching weather");
        match self.weather.fetch(&city).await {
            Ok(report) => report.render(&city),
            Err(e) => {
                warn!(%city, "Weather lookup failed: {e}");
                weather_error_reply(&e)
            }
        }
    }

    async fn fallback_reply(&self, history: &ConversationHistory, text: &str) -> String {
        let Some(provider) = &self.provider else {
            return NO_PROVIDER_REPLY.to_string();
        };

        match provider.generate(history.window(CONTEXT_WINDOW), text).await {
            Ok(reply) if reply.trim().is_empty() => EMPTY_PROVIDER_REPLY.to_string(),
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!(provider = provider.name(), "Provider call failed: {e}");
                PROVIDER_FAILED_REPLY.to_string()
            }
        }
    }
}

/// The sentence shown for a failed weather lookup.
pub fn weather_error_reply(err: &WeatherError) -> String {
    match err {
        WeatherError::MissingCredentials => {
            "Weather API key is missing! Add OPENWEATHER_API_KEY to your environment.".to_string()
        }
        WeatherError::NotFound(city) => format!(
            "❌ Couldn't find weather for '{city}'. Please check the city name and try again."
        ),
        WeatherError::Timeout { .. } => "⏱️ Weather service timed out. Please try again.".to_string(),
        WeatherError::Unavailable(_) => {
            "⚠️ Weather service is temporarily unavailable. Please try again later.".to_string()
        }
    }
}

/// Current local date and time, e.g. `March 05, 2025 - 02:30 PM`.
pub fn local_time_reply() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}
