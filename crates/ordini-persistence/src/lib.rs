//! Persistence layer for the ordini bot.
//!
//! This crate provides crash-safe persistence for the order collection
//! using atomic file operations (write to temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use ordini_persistence::OrderStore;
//! use ordini_models::Order;
//!
//! let store = OrderStore::new("/home/user/.ordini-bot/orders.json");
//!
//! // Record an order
//! store.add(Order::new(42, "Mario Rossi", "margherita")).unwrap();
//!
//! // List everything back
//! let orders = store.load().unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod order_store;

pub use error::{PersistenceError, Result};
pub use order_store::OrderStore;
