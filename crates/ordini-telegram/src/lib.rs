//! Telegram bot that collects the day's food orders from a group chat.
//!
//! Ordering is gated on whether the events API announces an event for
//! today: a background scheduler refreshes the gate every morning and
//! force-closes ordering every evening, and command handlers read the
//! resulting gating state when deciding whether to accept an order.
//!
//! # Configuration
//!
//! The bot reads `config.json` from its state directory (default
//! `~/.ordini-bot`, override with `ORDINI_STATE_DIR`):
//!
//! - `token`: bot token from @BotFather (`ORDINI_BOT_TOKEN` overrides)
//! - `admin_ids`: admin allow-list (Telegram user ids)
//! - `api_base_url` / `api_token`: events API endpoint
//! - `announce_chat_id` / `announce_thread_id`: announcement destination
//! - `purge_limit`: optional `/clean` cap override (default 200)
//!
//! # Commands
//!
//! - `/start` - today's date and event
//! - `/ordina <text>` - place an order
//! - `/lista` - list today's orders
//! - `/cancella` - cancel your own order
//! - `/clear` - empty all orders (admin)
//! - `/clean [count]` - delete recent messages (admin)
//!
//! Any other message in the monitored chat is deleted to keep the
//! ordering channel clean.

pub mod bot;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod janitor;
pub mod notifier;
pub mod scheduler;
pub mod state;

pub use bot::OrdiniBot;
pub use error::{BotError, Result};
pub use gate::EventGate;
pub use notifier::Announcer;
pub use state::BotState;
