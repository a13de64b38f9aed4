//! `chatwise status` — Show the effective configuration.

use chatwise_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("💬 Chatwise Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Weather key:  {}", if config.has_weather_key() { "set" } else { "missing" });
    println!("  LLM:          {} ({})", config.llm.provider, config.llm.model);
    println!("  LLM key:      {}", if config.has_llm_key() { "set" } else { "missing" });
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!("  Max sessions: {}", config.gateway.max_sessions);
    println!();
    println!("{config:#?}");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `chatwise onboard` to create one");
    }

    Ok(())
}
