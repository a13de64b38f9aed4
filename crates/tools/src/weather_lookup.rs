//! Weather lookup against OpenWeatherMap.
//!
//! Calls the `/data/2.5/weather` endpoint in metric units and maps the
//! reply onto a [`WeatherReport`]. Every failure becomes a typed
//! [`WeatherError`]; there are no retries.

use async_trait::async_trait;
use chatwise_core::error::WeatherError;
use chatwise_core::text::title_case;
use chatwise_core::weather::{WeatherReport, WeatherService};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default current-weather endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap client.
pub struct OpenWeatherClient {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    /// Create a client. Without an API key every lookup fails with
    /// [`WeatherError::MissingCredentials`] and no request is sent.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| WeatherError::Unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingCredentials)?;

        debug!(city = %city, "Requesting current weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout { timeout_secs: self.timeout_secs }
                } else {
                    WeatherError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(city = %city, status = status.as_u16(), "Weather lookup rejected");
            return Err(WeatherError::NotFound(city.to_string()));
        }

        let body: ApiWeather = response.json().await.map_err(|e| {
            if e.is_timeout() {
                WeatherError::Timeout { timeout_secs: self.timeout_secs }
            } else {
                warn!(error = %e, "Could not decode weather response");
                WeatherError::Unavailable(format!("Failed to parse response: {e}"))
            }
        })?;

        Ok(body.into_report())
    }
}

// --- OpenWeatherMap API types ---

#[derive(Debug, Deserialize)]
struct ApiWeather {
    main: ApiMain,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    #[serde(default)]
    wind: ApiWind,
    #[serde(default)]
    sys: ApiSys,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSys {
    #[serde(default)]
    country: Option<String>,
}

impl ApiWeather {
    fn into_report(self) -> WeatherReport {
        let description = self
            .weather
            .first()
            .map(|c| title_case(&c.description))
            .unwrap_or_default();

        WeatherReport {
            temperature_c: self.main.temp.round() as i64,
            feels_like_c: self.main.feels_like.round() as i64,
            description,
            humidity_pct: self.main.humidity,
            // m/s to km/h
            wind_kmh: (self.wind.speed * 3.6 * 10.0).round() / 10.0,
            country_code: self.sys.country.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "weather": [{"id": 721, "main": "Haze", "description": "light rain"}],
        "main": {"temp": 30.6, "feels_like": 36.2, "humidity": 70},
        "wind": {"speed": 3.5},
        "sys": {"country": "IN"},
        "name": "Mumbai"
    }"#;

    #[test]
    fn maps_api_payload_to_report() {
        let api: ApiWeather = serde_json::from_str(SAMPLE).unwrap();
        let report = api.into_report();
        assert_eq!(report.temperature_c, 31);
        assert_eq!(report.feels_like_c, 36);
        assert_eq!(report.description, "Light Rain");
        assert_eq!(report.humidity_pct, 70);
        assert!((report.wind_kmh - 12.6).abs() < 1e-9);
        assert_eq!(report.country_code, "IN");
    }

    #[test]
    fn tolerates_missing_optional_sections() {
        let api: ApiWeather =
            serde_json::from_str(r#"{"main": {"temp": -2.4, "feels_like": -7.5, "humidity": 80}}"#)
                .unwrap();
        let report = api.into_report();
        assert_eq!(report.temperature_c, -2);
        assert_eq!(report.feels_like_c, -8);
        assert_eq!(report.description, "");
        assert_eq!(report.wind_kmh, 0.0);
        assert_eq!(report.country_code, "");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = OpenWeatherClient::new(DEFAULT_BASE_URL, None, 10).unwrap();
        let err = client.fetch("Mumbai").await.unwrap_err();
        assert_eq!(err, WeatherError::MissingCredentials);
    }

    #[tokio::test]
    async fn blank_key_counts_as_missing() {
        let client = OpenWeatherClient::new(DEFAULT_BASE_URL, Some("  ".into()), 10).unwrap();
        let err = client.fetch("Mumbai").await.unwrap_err();
        assert_eq!(err, WeatherError::MissingCredentials);
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        // Port 9 on localhost is the discard port; nothing answers HTTP there.
        let client =
            OpenWeatherClient::new("http://127.0.0.1:9/weather", Some("key".into()), 2).unwrap();
        let err = client.fetch("Mumbai").await.unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Unavailable(_) | WeatherError::Timeout { .. }
        ));
    }

    #[test]
    fn service_name() {
        let client = OpenWeatherClient::new(DEFAULT_BASE_URL, None, 10).unwrap();
        assert_eq!(client.name(), "openweathermap");
    }
}
