//! `chatwise gateway` — Start the HTTP chat server.

use chatwise_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("💬 Chatwise Gateway");
    println!("   Listening: http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Weather:   {}", if config.has_weather_key() { "enabled" } else { "no API key" });
    println!("   LLM:       {}", if config.has_llm_key() { config.llm.provider.as_str() } else { "disabled" });

    chatwise_gateway::start(config).await?;

    Ok(())
}
