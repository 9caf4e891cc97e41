//! Core data models for the ordini bot.
//!
//! This crate provides the fundamental data types shared across the bot:
//! orders, the daily event, and the gating state derived from it.

pub mod event;
pub mod order;

// Re-export main types
pub use event::{DailyEvent, GatingState};
pub use order::Order;
