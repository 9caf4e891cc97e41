//! Shared configuration for the ordini bot.
//!
//! Provides functions to locate the bot's state directory and the
//! configuration file, plus the parsed [`BotConfig`] itself.
//!
//! # Storage Structure
//!
//! All bot data is stored under `~/.ordini-bot/`:
//!
//! ```text
//! ~/.ordini-bot/
//! ├── config.json   # token, admin allow-list, events-API settings
//! ├── orders.json   # the day's orders
//! └── .env.local    # optional secrets loaded at startup
//! ```
//!
//! # Environment Variables
//!
//! - `ORDINI_STATE_DIR`: Override the base state directory
//! - `ORDINI_BOT_TOKEN`: Override the bot token from the config file

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Environment variable for a custom state directory.
pub const STATE_DIR_ENV: &str = "ORDINI_STATE_DIR";

/// Environment variable overriding the bot token.
pub const BOT_TOKEN_ENV: &str = "ORDINI_BOT_TOKEN";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".ordini-bot";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the bot state directory.
///
/// The state directory is determined by:
/// 1. `ORDINI_STATE_DIR` environment variable if set
/// 2. `~/.ordini-bot` if home directory is available
/// 3. `.ordini-bot` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the orders file path.
pub fn orders_file() -> PathBuf {
    state_dir().join("orders.json")
}

/// Get the main config file path.
pub fn config_file() -> PathBuf {
    state_dir().join("config.json")
}

/// Get the env file path.
///
/// Environment file for secrets (bot token, API token).
pub fn env_file() -> PathBuf {
    state_dir().join(".env.local")
}

/// Ensure the state directory exists, creating it if necessary.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_state_dir() -> std::io::Result<()> {
    let dir = state_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Errors that can occur while loading configuration.
///
/// All of these are fatal at startup: the process does not start without a
/// complete, valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist.
    #[error("config file not found at {path}; create it with token, admin_ids, api_base_url and api_token")]
    NotFound { path: PathBuf },

    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`BotConfig`].
    #[error("failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is empty or missing.
    #[error("missing required config field: {0}")]
    MissingField(&'static str),

    /// `api_base_url` is not an absolute URL.
    #[error("invalid api_base_url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Parsed bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token. May also come from `ORDINI_BOT_TOKEN`.
    #[serde(default)]
    pub token: String,

    /// Static admin allow-list (Telegram user ids). This is the only
    /// authorization mechanism the bot has.
    #[serde(default)]
    pub admin_ids: Vec<i64>,

    /// Base URL of the events API.
    pub api_base_url: String,

    /// Access token passed to the events API.
    pub api_token: String,

    /// Chat to send daily announcements to. Announcements are skipped with
    /// a warning when unset.
    #[serde(default)]
    pub announce_chat_id: Option<i64>,

    /// Optional forum sub-thread inside the announcement chat.
    #[serde(default)]
    pub announce_thread_id: Option<i32>,

    /// Override for the `/clean` message cap (default 200).
    #[serde(default)]
    pub purge_limit: Option<u32>,
}

impl BotConfig {
    /// Load the configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file())
    }

    /// Load the configuration from a specific path.
    ///
    /// The `ORDINI_BOT_TOKEN` environment variable, when set, overrides
    /// the token from the file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: BotConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        if let Ok(token) = std::env::var(BOT_TOKEN_ENV) {
            config.token = token;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate required fields.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::MissingField("token"));
        }
        if self.api_token.is_empty() {
            return Err(ConfigError::MissingField("api_token"));
        }
        self.base_url()?;
        Ok(())
    }

    /// The events-API base URL, parsed.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::MissingField("api_base_url"));
        }
        Ok(Url::parse(&self.api_base_url)?)
    }

    /// Whether `user_id` is in the admin allow-list.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
