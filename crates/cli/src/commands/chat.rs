//! `chatwise chat` — Interactive or single-message chat mode.

use chatwise_config::AppConfig;
use chatwise_core::message::ConversationHistory;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let dispatcher = chatwise_gateway::build_dispatcher(&config)?;
    let mut history = ConversationHistory::new();

    if let Some(msg) = message {
        // Single message mode
        let response = dispatcher.handle(&mut history, &msg).await;
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Chatwise — Interactive Mode           ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!(
        "  Weather:   {}",
        if config.has_weather_key() { "enabled" } else { "no API key" }
    );
    println!(
        "  LLM:       {}",
        dispatcher.provider_name().unwrap_or("disabled")
    );
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    if let Some(greeting) = history.messages().first() {
        println!("  Assistant > {}", greeting.text());
        println!();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }

        let response = dispatcher.handle(&mut history, line).await;
        println!();
        for text in response.lines() {
            println!("  Assistant > {text}");
        }
        println!();

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
