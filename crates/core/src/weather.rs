//! Weather service trait and report type.
//!
//! The dispatcher asks a `WeatherService` for current conditions once it
//! has extracted a city from a weather query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::WeatherError;

/// Current conditions for one city, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Air temperature, rounded to whole degrees Celsius
    pub temperature_c: i64,

    /// Perceived temperature, rounded to whole degrees Celsius
    pub feels_like_c: i64,

    /// Title-cased condition text (e.g., "Light Rain")
    pub description: String,

    pub humidity_pct: u32,

    /// Wind speed in km/h, one decimal
    pub wind_kmh: f64,

    /// ISO country code; empty when the service did not report one
    #[serde(default)]
    pub country_code: String,
}

impl WeatherReport {
    /// Render the report as a chat reply for `city`.
    pub fn render(&self, city: &str) -> String {
        let location = if self.country_code.is_empty() {
            city.to_string()
        } else {
            format!("{city}, {}", self.country_code)
        };
        format!(
            "**{location}**\n\
             🌡️ Temperature: {}°C (feels like {}°C)\n\
             ☁️ Conditions: {}\n\
             💧 Humidity: {}%\n\
             🌬️ Wind: {:.1} km/h",
            self.temperature_c, self.feels_like_c, self.description, self.humidity_pct, self.wind_kmh
        )
    }
}

/// A source of current weather conditions.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// The service name (e.g., "openweathermap").
    fn name(&self) -> &str;

    /// Fetch current conditions for a city name.
    async fn fetch(&self, city: &str) -> std::result::Result<WeatherReport, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(country: &str) -> WeatherReport {
        WeatherReport {
            temperature_c: 31,
            feels_like_c: 36,
            description: "Haze".into(),
            humidity_pct: 62,
            wind_kmh: 11.0,
            country_code: country.into(),
        }
    }

    #[test]
    fn render_includes_country_when_known() {
        let text = report("IN").render("Mumbai");
        assert!(text.starts_with("**Mumbai, IN**"));
        assert!(text.contains("Temperature: 31°C (feels like 36°C)"));
        assert!(text.contains("Conditions: Haze"));
        assert!(text.contains("Humidity: 62%"));
        assert!(text.contains("Wind: 11.0 km/h"));
    }

    #[test]
    fn render_without_country() {
        let text = report("").render("Atlantis");
        assert!(text.starts_with("**Atlantis**\n"));
    }
}
