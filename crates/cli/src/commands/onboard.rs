//! `chatwise onboard` — Write a default config file.

use chatwise_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("💬 Chatwise — First-Time Setup");
    println!("==============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file already exists: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Wrote default config: {}", config_path.display());
    }

    println!();
    println!("  API keys are read from the environment (or a .env file):");
    println!("    OPENWEATHER_API_KEY   weather lookups");
    println!("    GEMINI_API_KEY        open-ended questions");
    println!();
    println!("  Then run `chatwise chat` or `chatwise gateway`.");

    Ok(())
}
