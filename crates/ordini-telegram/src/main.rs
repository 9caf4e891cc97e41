//! Ordini Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! ORDINI_BOT_TOKEN=xxx cargo run -p ordini-telegram
//! ```

use clap::Parser;
use ordini_core::{config, BotConfig};
use ordini_telegram::OrdiniBot;
use tracing_subscriber::EnvFilter;

/// Ordini Bot - collects the day's food orders from a group chat
#[derive(Parser, Debug)]
#[command(name = "ordini-bot")]
#[command(about = "Telegram bot that collects food orders for the day's event")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load environment variables from the state directory first
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    // Also try a local .env for development
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "ordini_telegram=info,teloxide=warn",
        1 => "ordini_telegram=debug,teloxide=info",
        2 => "ordini_telegram=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = config::ensure_state_dir() {
        tracing::warn!(error = %e, "Failed to create state directory");
    }

    // Missing or invalid configuration is fatal: the process does not start.
    let bot_config = match BotConfig::load() {
        Ok(bot_config) => bot_config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return Err(e.into());
        }
    };

    let mut bot = OrdiniBot::new(bot_config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n🍕 Ordini Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n📱 Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
