//! Shared configuration and the events-API client for the ordini bot.

pub mod config;
pub mod events_api;

pub use config::{BotConfig, ConfigError};
pub use events_api::{EventsApiError, EventsClient, EventsToday};
