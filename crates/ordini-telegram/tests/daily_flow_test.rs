//! Integration tests for the daily gating flow.
//!
//! These exercise the contract between the events payload, the gating
//! state and the order store, the way one day of bot operation uses them.

use ordini_core::EventsToday;
use ordini_models::{GatingState, Order};
use ordini_persistence::OrderStore;
use serde_json::json;
use tempfile::tempdir;

/// What a refresh derives from a fetched payload.
fn gating_from_payload(payload: serde_json::Value) -> GatingState {
    match EventsToday::from_raw(payload).into_daily_event() {
        Some(event) => GatingState::open_for(event),
        None => GatingState::closed(),
    }
}

#[test]
fn event_day_opens_ordering_and_accepts_an_order() {
    let state = gating_from_payload(json!({
        "event": {"title": "Pizza Night"},
        "date": "2024-05-01"
    }));

    assert!(state.ordering_open);
    assert_eq!(state.title(), Some("Pizza Night"));

    // A new user's order lands in the store and shows up in the listing.
    let dir = tempdir().unwrap();
    let store = OrderStore::new(dir.path().join("orders.json"));
    store.add(Order::new(42, "Mario Rossi", "margherita")).unwrap();

    let orders = store.load().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].listing_line(), "Mario Rossi: margherita");
}

#[test]
fn empty_payload_keeps_ordering_closed() {
    let state = gating_from_payload(json!({}));

    assert!(!state.ordering_open);
    assert!(!state.has_event());
}

#[test]
fn evening_cutover_closes_but_remembers_the_event() {
    let mut state = gating_from_payload(json!({
        "event": {"title": "Pizza Night"},
        "date": "2024-05-01"
    }));

    // The cutover flips the flag without touching the event.
    state.ordering_open = false;

    assert!(state.has_event());
    assert!(!state.ordering_open);
}

#[test]
fn a_full_day_of_orders() {
    let dir = tempdir().unwrap();
    let store = OrderStore::new(dir.path().join("orders.json"));

    store.add(Order::new(1, "Anna", "diavola")).unwrap();
    store.add(Order::new(2, "Luca", "capricciosa")).unwrap();
    assert!(store.add(Order::new(1, "Anna", "margherita")).is_err());

    // Anna changes her mind the supported way: cancel, then re-order.
    assert!(store.remove_by_user(1).unwrap());
    store.add(Order::new(1, "Anna", "margherita")).unwrap();

    let orders = store.load().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, 2);
    assert_eq!(orders[1].order, "margherita");

    // End of day: the admin wipes the slate.
    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
}
