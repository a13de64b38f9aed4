//! Configuration loading, validation, and management for Chatwise.
//!
//! Loads configuration from `~/.chatwise/config.toml` with environment
//! variable overrides (a `.env` file in the working directory is read
//! first). Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// LLM backends `llm.provider` may name.
pub const KNOWN_PROVIDERS: &[&str] = &["gemini", "openai", "openrouter", "ollama"];

/// The root configuration structure.
///
/// Maps directly to `~/.chatwise/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_url")]
    pub base_url: String,

    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".into()
}
fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_url(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Backend name: gemini, openai, openrouter, or ollama
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Override the backend's base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-flash-lite-latest".into()
}
fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: default_model(),
            api_url: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Sessions kept in memory before the least recently used is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_max_sessions() -> usize {
    10_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.chatwise/config.toml).
    ///
    /// Environment variables override the file:
    /// - `OPENWEATHER_API_KEY`
    /// - `GEMINI_API_KEY`, then `CHATWISE_LLM_API_KEY`
    /// - `CHATWISE_LLM_PROVIDER`, `CHATWISE_LLM_MODEL`
    /// - `CHATWISE_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = lookup("OPENWEATHER_API_KEY") {
            self.weather.api_key = Some(key);
        }

        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("CHATWISE_LLM_API_KEY")) {
            self.llm.api_key = Some(key);
        }

        if let Some(provider) = lookup("CHATWISE_LLM_PROVIDER") {
            self.llm.provider = provider;
        }

        if let Some(model) = lookup("CHATWISE_LLM_MODEL") {
            self.llm.model = model;
        }

        if let Some(port) = lookup("CHATWISE_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("CHATWISE_PORT is not a valid port: {port}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".chatwise")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "weather.timeout_secs must be > 0".into(),
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_secs must be > 0".into(),
            ));
        }

        if !KNOWN_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown llm.provider '{}' (expected one of: {})",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.gateway.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.max_sessions must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a weather API key is available (from config or environment).
    pub fn has_weather_key(&self) -> bool {
        self.weather.api_key.is_some()
    }

    /// Check if a language model key is available (ollama needs none).
    pub fn has_llm_key(&self) -> bool {
        self.llm.api_key.is_some() || self.llm.provider == "ollama"
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-flash-lite-latest");
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.weather.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.llm.provider, config.llm.provider);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn unknown_provider_rejected() {
        let mut config = AppConfig::default();
        config.llm.provider = "carrier-pigeon".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.weather.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().llm.provider, "gemini");
    }

    #[test]
    fn loads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[weather]
api_key = "owm-key"
timeout_secs = 5

[gateway]
port = 8080
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("owm-key"));
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.llm.provider, "gemini");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nport = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("OPENWEATHER_API_KEY", "w-key"),
                ("GEMINI_API_KEY", "g-key"),
                ("CHATWISE_LLM_API_KEY", "ignored"),
                ("CHATWISE_LLM_MODEL", "gemini-pro"),
                ("CHATWISE_PORT", "9000"),
            ]))
            .unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("w-key"));
        assert_eq!(config.llm.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.llm.model, "gemini-pro");
        assert_eq!(config.gateway.port, 9000);
    }

    #[test]
    fn generic_llm_key_used_without_gemini_key() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("CHATWISE_LLM_API_KEY", "sk-openai"),
                ("CHATWISE_LLM_PROVIDER", "openai"),
            ]))
            .unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-openai"));
        assert_eq!(config.llm.provider, "openai");
        assert!(config.has_llm_key());
    }

    #[test]
    fn bad_port_env_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("CHATWISE_PORT", "http")])).is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = AppConfig::default();
        config.weather.api_key = Some("super-secret-weather".into());
        config.llm.api_key = Some("super-secret-llm".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gemini"));
        assert!(toml_str.contains("5000"));
    }
}
