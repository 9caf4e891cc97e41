//! Error types for the ordini bot.

use thiserror::Error;

/// Errors that can occur in the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Configuration error (fatal at startup).
    #[error("Configuration error: {0}")]
    Config(#[from] ordini_core::ConfigError),

    /// Order store error.
    #[error("Persistence error: {0}")]
    Persistence(#[from] ordini_persistence::PersistenceError),

    /// Events API error.
    #[error("Events API error: {0}")]
    EventsApi(#[from] ordini_core::EventsApiError),

    /// Telegram API error.
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
