//! Order store backed by a single JSON file.

use std::path::PathBuf;

use ordini_models::Order;

use crate::atomic::{atomic_write_json, read_json_or_default};
use crate::error::{PersistenceError, Result};

/// Manages persistence of the day's orders.
///
/// The whole collection lives in one file and is rewritten wholesale on
/// every mutation:
/// ```text
/// ~/.ordini-bot/
/// └── orders.json    # ordered list of {id, name, order}
/// ```
///
/// No in-memory cache is kept between operations; every mutation is a full
/// read-modify-write, so under concurrent commands the last writer wins.
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    /// Creates a new OrderStore over the given orders file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the persisted collection, empty if no file exists yet.
    ///
    /// A malformed file is a startup-class error and propagates.
    pub fn load(&self) -> Result<Vec<Order>> {
        read_json_or_default(&self.path)
    }

    /// Overwrites the persisted collection.
    pub fn save(&self, orders: &[Order]) -> Result<()> {
        atomic_write_json(&self.path, &orders)
    }

    /// Appends an order, rejecting a second order from the same user.
    pub fn add(&self, order: Order) -> Result<()> {
        let mut orders = self.load()?;

        if orders.iter().any(|o| o.id == order.id) {
            return Err(PersistenceError::DuplicateOrder { user_id: order.id });
        }

        orders.push(order);
        self.save(&orders)
    }

    /// Removes the order belonging to `user_id`, if any.
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_user(&self, user_id: i64) -> Result<bool> {
        let orders = self.load()?;
        let remaining: Vec<Order> = orders.iter().filter(|o| o.id != user_id).cloned().collect();

        if remaining.len() == orders.len() {
            return Ok(false);
        }

        self.save(&remaining)?;
        Ok(true)
    }

    /// Empties the collection.
    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> OrderStore {
        OrderStore::new(dir.path().join("orders.json"))
    }

    #[test]
    fn test_load_empty_when_no_file() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_load() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Order::new(42, "Mario Rossi", "margherita")).unwrap();

        let orders = store.load().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].name, "Mario Rossi");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Order::new(42, "Mario", "margherita")).unwrap();
        let result = store.add(Order::new(42, "Mario", "diavola"));

        assert!(matches!(
            result,
            Err(PersistenceError::DuplicateOrder { user_id: 42 })
        ));

        // The file is unchanged: still the first order only.
        let orders = store.load().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order, "margherita");
    }

    #[test]
    fn test_remove_by_user() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Order::new(1, "Mario", "margherita")).unwrap();
        store.add(Order::new(2, "Anna", "diavola")).unwrap();

        assert!(store.remove_by_user(1).unwrap());

        let orders = store.load().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 2);
    }

    #[test]
    fn test_remove_by_user_nothing_to_remove() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.remove_by_user(99).unwrap());
    }

    #[test]
    fn test_remove_is_idempotent_in_effect() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Order::new(1, "Mario", "margherita")).unwrap();

        assert!(store.remove_by_user(1).unwrap());
        assert!(!store.remove_by_user(1).unwrap());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Order::new(1, "Mario", "margherita")).unwrap();
        store.add(Order::new(2, "Anna", "diavola")).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_storage_order_preserved() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        for (id, name) in [(3, "c"), (1, "a"), (2, "b")] {
            store.add(Order::new(id, name, "x")).unwrap();
        }

        let orders = store.load().unwrap();
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
