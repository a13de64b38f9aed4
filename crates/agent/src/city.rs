//! City slot extraction for weather queries.
//!
//! Purely lexical: a handful of ordered phrase patterns, then a
//! short-message heuristic that treats whatever is left after dropping
//! question words as the city. There is no gazetteer, so the result is
//! only a best guess that the weather service gets to confirm.

use chatwise_core::text::title_case;
use regex::Regex;
use std::sync::LazyLock;

/// Phrase patterns tried in order; group 1 is the candidate city.
static CITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"weather\s+(?:of|in|at|for|)\s+([a-z\s]{2,30})",
        r"(?:temp|temperature)\s+(?:of|in|at|for|)\s+([a-z\s]{2,30})",
        r"(?:what|whats|how)\s+(?:is\s+)?(?:the\s+)?weather\s+(?:of|in|at|for|)\s+([a-z\s]{2,30})",
        r"(?:of|in|at|for)\s+([a-z\s]{2,30})\s+weather",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:the|a|an|is|was|today|now|currently)\b").expect("valid regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").expect("valid regex"));

/// Captures that point at the speaker rather than a place.
const NON_PLACES: &[&str] = &["me", "here", "my", "there"];

/// Words dropped before treating a short message as a bare city name.
const QUESTION_WORDS: &[&str] = &[
    "what",
    "whats",
    "is",
    "the",
    "weather",
    "temp",
    "temperature",
    "of",
    "in",
    "at",
    "for",
    "how",
];

/// Messages with more words than this never use the bare-name heuristic.
const SHORT_MESSAGE_WORDS: usize = 4;

const MIN_CITY_LEN: usize = 3;

/// Extract a title-cased city name from a weather query.
pub fn extract_city(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    from_patterns(&lower).or_else(|| from_short_message(&lower))
}

fn from_patterns(lower: &str) -> Option<String> {
    CITY_PATTERNS.iter().find_map(|pattern| {
        let capture = pattern.captures(lower)?.get(1)?.as_str();
        let cleaned = FILLER_WORDS.replace_all(capture, "");
        let city = WHITESPACE_RUN.replace_all(cleaned.trim(), " ");

        if city.len() < MIN_CITY_LEN || NON_PLACES.contains(&city.as_ref()) {
            return None;
        }
        Some(title_case(&city))
    })
}

fn from_short_message(lower: &str) -> Option<String> {
    let words: Vec<&str> = WORD.find_iter(lower).map(|m| m.as_str()).collect();
    if words.len() > SHORT_MESSAGE_WORDS {
        return None;
    }

    let remaining: Vec<&str> = words
        .into_iter()
        .filter(|w| !QUESTION_WORDS.contains(w))
        .collect();
    if !(1..=3).contains(&remaining.len()) {
        return None;
    }

    let city = title_case(&remaining.join(" "));
    (city.len() >= MIN_CITY_LEN).then_some(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_in_city() {
        assert_eq!(extract_city("weather in Mumbai").as_deref(), Some("Mumbai"));
        assert_eq!(extract_city("Weather of DELHI").as_deref(), Some("Delhi"));
        assert_eq!(extract_city("weather for new york").as_deref(), Some("New York"));
    }

    #[test]
    fn bare_city_name() {
        assert_eq!(extract_city("Mumbai").as_deref(), Some("Mumbai"));
        assert_eq!(extract_city("san francisco weather").as_deref(), Some("San Francisco"));
    }

    #[test]
    fn no_city_in_generic_question() {
        assert_eq!(extract_city("what is the weather"), None);
        assert_eq!(extract_city("weather"), None);
    }

    #[test]
    fn temperature_phrasing() {
        assert_eq!(extract_city("temperature in london").as_deref(), Some("London"));
        assert_eq!(extract_city("temp at Pune").as_deref(), Some("Pune"));
    }

    #[test]
    fn fillers_are_stripped_and_spaces_collapsed() {
        assert_eq!(
            extract_city("what is the weather in the new york today").as_deref(),
            Some("New York")
        );
        assert_eq!(
            extract_city("weather in paris now please").as_deref(),
            Some("Paris Please")
        );
    }

    #[test]
    fn city_before_weather() {
        assert_eq!(
            extract_city("how is it in chennai weather wise").as_deref(),
            Some("Chennai")
        );
    }

    #[test]
    fn rejects_non_places() {
        assert_eq!(extract_city("weather for me"), None);
        // Too many words for the bare-name heuristic to pick "here" up.
        assert_eq!(extract_city("what's the weather in here now"), None);
    }

    #[test]
    fn short_capture_is_rejected() {
        assert_eq!(extract_city("weather in la"), None);
    }

    #[test]
    fn long_message_without_pattern_has_no_city() {
        assert_eq!(extract_city("is it going to rain a lot soon"), None);
    }

    #[test]
    fn punctuation_does_not_leak_into_city() {
        assert_eq!(extract_city("weather in Tokyo?").as_deref(), Some("Tokyo"));
    }
}
