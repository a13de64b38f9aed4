//! Canned jokes.

use rand::Rng;

pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "What do you call a fake noodle? An impasta!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a bear with no teeth? A gummy bear!",
];

/// Pick one joke uniformly at random.
pub fn random_joke() -> &'static str {
    let mut rng = rand::rng();
    JOKES[rng.random_range(0..JOKES.len())]
}
