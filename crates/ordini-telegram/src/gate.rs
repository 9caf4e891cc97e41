//! The event gate: whether ordering is open, and for what.

use ordini_core::EventsClient;
use ordini_models::{DailyEvent, GatingState};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::notifier::Announcer;

/// Owns the gating state and the events API client.
///
/// The gate has exactly two stable states, open and closed, driven by the
/// once-daily fetch. Fetch failures and "no event" both close ordering;
/// they are only distinguished in the logs.
pub struct EventGate {
    client: EventsClient,
    state: RwLock<GatingState>,
}

impl EventGate {
    /// Creates a gate in the closed startup state.
    pub fn new(client: EventsClient) -> Self {
        Self {
            client,
            state: RwLock::new(GatingState::closed()),
        }
    }

    /// A snapshot of the current gating state for a command handler.
    pub async fn snapshot(&self) -> GatingState {
        self.state.read().await.clone()
    }

    /// Refreshes the gate from the events API.
    ///
    /// On success with an event, ordering opens and, if `announce` is set,
    /// the daily message goes out through the announcer. Any failure or an
    /// event-less day closes ordering; there is no retry until the next
    /// scheduled refresh.
    pub async fn refresh(&self, announce: bool, announcer: &Announcer) {
        match self.client.fetch_today().await {
            Ok(today) => match today.into_daily_event() {
                Some(event) => {
                    info!(title = %event.title, date = %event.date, "Event found for today, ordering open");
                    let message = daily_announcement(&event);
                    *self.state.write().await = GatingState::open_for(event);
                    if announce {
                        announcer.announce(&message).await;
                    }
                }
                None => {
                    info!("No event today, ordering stays closed");
                    *self.state.write().await = GatingState::closed();
                }
            },
            Err(e) => {
                warn!(error = %e, "Event fetch failed, ordering stays closed");
                *self.state.write().await = GatingState::closed();
            }
        }
    }

    /// Unconditionally closes ordering, keeping the known event.
    pub async fn force_close(&self) {
        self.state.write().await.ordering_open = false;
        info!("Ordering closed for today");
    }
}

/// The morning announcement for an event day.
pub fn daily_announcement(event: &DailyEvent) -> String {
    format!(
        "👋 Buongiorno!\n\
        🗓 Data: {}\n\
        🎉 Evento del giorno: {}\n\n\
        Usa /ordina per fare un ordine 🍕",
        display_date(&event.date),
        event.title
    )
}

/// Date string with a fallback when the API omitted it.
pub(crate) fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "data non disponibile"
    } else {
        date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_gate() -> EventGate {
        let base = Url::parse("http://localhost:3000").unwrap();
        EventGate::new(EventsClient::new(base, "secret").unwrap())
    }

    #[tokio::test]
    async fn test_starts_closed() {
        let gate = test_gate();
        let state = gate.snapshot().await;
        assert!(!state.ordering_open);
        assert!(!state.has_event());
    }

    #[tokio::test]
    async fn test_force_close_keeps_event() {
        let gate = test_gate();
        *gate.state.write().await =
            GatingState::open_for(DailyEvent::new("2024-05-01", "Pizza Night"));

        gate.force_close().await;

        let state = gate.snapshot().await;
        assert!(!state.ordering_open);
        assert_eq!(state.title(), Some("Pizza Night"));
    }

    #[test]
    fn test_daily_announcement_format() {
        let message = daily_announcement(&DailyEvent::new("2024-05-01", "Pizza Night"));
        assert!(message.contains("2024-05-01"));
        assert!(message.contains("Pizza Night"));
        assert!(message.contains("/ordina"));
    }

    #[test]
    fn test_display_date_fallback() {
        assert_eq!(display_date("2024-05-01"), "2024-05-01");
        assert_eq!(display_date(""), "data non disponibile");
    }
}
