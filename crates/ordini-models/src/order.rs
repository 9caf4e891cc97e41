//! Order types for the ordini bot.
//!
//! An order is one user's request for the day. The serde field names are
//! the persisted wire names, so the orders file stays readable as a plain
//! list of `{id, name, order}` objects.

use serde::{Deserialize, Serialize};

/// A single food order placed by a group member.
///
/// At most one order per Telegram user id may exist in a stored
/// collection; a resubmission is rejected rather than merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Telegram user id of the person who ordered.
    pub id: i64,

    /// Display name of the person who ordered.
    pub name: String,

    /// Free-text order content.
    pub order: String,
}

impl Order {
    /// Creates a new order.
    pub fn new(id: i64, name: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            order: order.into(),
        }
    }

    /// Renders the order as a `name: order` listing line.
    pub fn listing_line(&self) -> String {
        format!("{}: {}", self.name, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_format() {
        let order = Order::new(42, "Mario Rossi", "margherita");
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], 42);
        assert_eq!(json["name"], "Mario Rossi");
        assert_eq!(json["order"], "margherita");
    }

    #[test]
    fn test_order_roundtrip() {
        let order = Order::new(7, "Anna", "quattro stagioni");
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, back);
    }

    #[test]
    fn test_listing_line() {
        let order = Order::new(1, "Mario Rossi", "margherita");
        assert_eq!(order.listing_line(), "Mario Rossi: margherita");
    }
}
