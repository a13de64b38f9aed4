//! Chatwise CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Write a default config file
//! - `chat`     — Interactive chat or single-message mode
//! - `gateway`  — Start the HTTP chat server
//! - `eval`     — Evaluate an arithmetic expression
//! - `status`   — Show the effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chatwise",
    about = "Chatwise — a rule-routed chat assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Chat from the terminal
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Evaluate an arithmetic expression
    Eval {
        /// The expression, e.g. `(2 + 3) * 4`
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Eval { expression } => commands::eval::run(&expression.join(" "))?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn eval_accepts_leading_minus() {
        let cli = Cli::try_parse_from(["chatwise", "eval", "-5", "+", "3"]).unwrap();
        match cli.command {
            Commands::Eval { expression } => assert_eq!(expression.join(" "), "-5 + 3"),
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["chatwise", "chat", "-m", "hi", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
