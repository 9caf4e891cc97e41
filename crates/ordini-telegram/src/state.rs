//! Shared state for the bot, accessible across all handlers.

use std::path::PathBuf;

use ordini_core::{BotConfig, EventsClient};
use ordini_persistence::OrderStore;
use teloxide::Bot;

use crate::error::Result;
use crate::gate::EventGate;
use crate::janitor::DEFAULT_PURGE_LIMIT;
use crate::notifier::Announcer;

/// Everything the command handlers and the scheduler share: the parsed
/// configuration, the order store, the event gate and the announcer.
///
/// Shared via `Arc`; there are no process-wide globals. The store is
/// re-read from disk on every command, so the state itself holds no order
/// cache.
pub struct BotState {
    /// Parsed bot configuration.
    pub config: BotConfig,
    /// The day's orders, backed by the orders file.
    pub store: OrderStore,
    /// Ordering gate driven by the events API.
    pub gate: EventGate,
    /// Daily announcement sender.
    pub announcer: Announcer,
}

impl BotState {
    /// Creates the shared state over the default orders file.
    pub fn new(bot: Bot, config: BotConfig) -> Result<Self> {
        Self::with_orders_file(bot, config, ordini_core::config::orders_file())
    }

    /// Creates the shared state over a custom orders file (for testing).
    pub fn with_orders_file(
        bot: Bot,
        config: BotConfig,
        orders_file: impl Into<PathBuf>,
    ) -> Result<Self> {
        let store = OrderStore::new(orders_file);
        let client = EventsClient::new(config.base_url()?, config.api_token.clone())?;
        let gate = EventGate::new(client);
        let announcer = Announcer::new(bot, config.announce_chat_id, config.announce_thread_id);

        Ok(Self {
            config,
            store,
            gate,
            announcer,
        })
    }

    /// Whether `user_id` is in the configured admin allow-list.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.config.is_admin(user_id)
    }

    /// The `/clean` cap: configured override or the default.
    pub fn purge_limit(&self) -> u32 {
        self.config.purge_limit.unwrap_or(DEFAULT_PURGE_LIMIT)
    }
}
