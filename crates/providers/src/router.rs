//! Provider selection: builds the configured LLM backend.

use std::sync::Arc;
use chatwise_config::LlmConfig;
use chatwise_core::error::ProviderError;
use chatwise_core::provider::Provider;
use tracing::info;
use crate::gemini::GeminiProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the language model named in the configuration.
///
/// Returns `Ok(None)` when no API key is configured (Ollama needs none):
/// the dispatcher then answers open-ended questions with a canned hint
/// instead of calling a model.
pub fn build_from_config(
    config: &LlmConfig,
) -> Result<Option<Arc<dyn Provider>>, ProviderError> {
    let api_key = match (&config.api_key, config.provider.as_str()) {
        (Some(key), _) if !key.trim().is_empty() => key.clone(),
        (_, "ollama") => "ollama".to_string(),
        _ => {
            info!(provider = %config.provider, "No language model key configured; open-ended replies disabled");
            return Ok(None);
        }
    };

    let base_url = config
        .api_url
        .clone()
        .unwrap_or_else(|| default_base_url(&config.provider).to_string());

    let provider: Arc<dyn Provider> = match config.provider.as_str() {
        "gemini" => Arc::new(GeminiProvider::new(
            base_url,
            api_key,
            &config.model,
            config.timeout_secs,
        )?),
        name => Arc::new(OpenAiCompatProvider::new(
            name,
            base_url,
            api_key,
            &config.model,
            config.timeout_secs,
        )?),
    };

    info!(provider = %provider.name(), model = %config.model, "Language model ready");
    Ok(Some(provider))
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> &'static str {
    match provider_name {
        "gemini" => crate::gemini::DEFAULT_BASE_URL,
        "openrouter" => "https://openrouter.ai/api/v1",
        "ollama" => "http://localhost:11434/v1",
        _ => "https://api.openai.com/v1",
    }
}
