//! Intent classifier. Picks one response strategy per message.
//!
//! Rules are an ordered list of `(predicate, Intent)` pairs evaluated
//! against the lower-cased text. The first predicate that holds wins, so
//! a message mentioning both the weather and `2 + 2` is a weather query.

use chatwise_core::intent::Intent;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "temp",
    "forecast",
    "rain",
    "sunny",
    "cloud",
    "hot",
    "cold",
    "degree",
    "climate",
];

const MATH_KEYWORDS: &[&str] = &[
    "factorial",
    "calculate",
    "compute",
    "solve",
    "add",
    "subtract",
    "multiply",
    "divide",
    "plus",
    "minus",
    "times",
    "sum",
    "difference",
    "product",
    "quotient",
    "square",
    "sqrt",
    "power",
    "root",
];

const JOKE_KEYWORDS: &[&str] = &["joke", "funny", "laugh", "make me laugh"];

const TIME_KEYWORDS: &[&str] = &["time", "date", "what day"];

/// Two numbers joined by an operator, e.g. `12*4` or `3 ^ 2`.
static OPERATOR_BETWEEN_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\s*[+\-*/^%()]\s*[0-9]+").expect("valid regex"));

/// Two numbers with an operator somewhere between, e.g. `what is 5 and then / 2`.
static LOOSE_ARITHMETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+.*?[+\-*/].*?[0-9]+").expect("valid regex"));

type Rule = (fn(&str) -> bool, Intent);

/// Classification rules in precedence order.
const RULES: &[Rule] = &[
    (is_weather_query, Intent::Weather),
    (is_math_query, Intent::Math),
    (is_joke_request, Intent::Joke),
    (is_time_query, Intent::Time),
];

/// Classify a message into exactly one intent.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    let intent = RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Fallback);

    debug!(%intent, "Classified message");
    intent
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// True when the lower-cased text mentions weather.
pub fn is_weather_query(lower: &str) -> bool {
    contains_any(lower, WEATHER_KEYWORDS)
}

/// True when the lower-cased text looks like arithmetic or names a math
/// operation.
pub fn is_math_query(lower: &str) -> bool {
    OPERATOR_BETWEEN_NUMBERS.is_match(lower)
        || contains_any(lower, MATH_KEYWORDS)
        || LOOSE_ARITHMETIC.is_match(lower)
}

pub fn is_joke_request(lower: &str) -> bool {
    contains_any(lower, JOKE_KEYWORDS)
}

pub fn is_time_query(lower: &str) -> bool {
    contains_any(lower, TIME_KEYWORDS)
}
