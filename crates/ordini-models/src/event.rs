//! Daily event and gating types.
//!
//! The events API publishes at most one event per day. Whether ordering is
//! open is derived from the most recent fetch plus the two daily cutover
//! times; nothing here survives a process restart.

use serde::{Deserialize, Serialize};

/// Today's event as announced by the events API.
///
/// Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEvent {
    /// Event date as reported by the API (e.g. `2024-05-01`).
    pub date: String,

    /// Event title, e.g. "Pizza Night".
    pub title: String,

    /// The full payload the API returned, kept for display and debugging.
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl DailyEvent {
    /// Creates a new daily event.
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            raw: serde_json::Value::Null,
        }
    }
}

/// Whether ordering is currently allowed, and for what.
///
/// Process-lifetime only. The bot starts closed and stays closed until the
/// first successful fetch reports an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GatingState {
    /// Whether order submission is currently open.
    pub ordering_open: bool,

    /// The event ordering is open for, if any.
    pub event: Option<DailyEvent>,
}

impl GatingState {
    /// The startup state: closed, no event.
    pub fn closed() -> Self {
        Self::default()
    }

    /// State for an announced event with ordering open.
    pub fn open_for(event: DailyEvent) -> Self {
        Self {
            ordering_open: true,
            event: Some(event),
        }
    }

    /// Whether an event is known for today.
    pub fn has_event(&self) -> bool {
        self.event.is_some()
    }

    /// Title of today's event, if any.
    pub fn title(&self) -> Option<&str> {
        self.event.as_ref().map(|e| e.title.as_str())
    }
}
