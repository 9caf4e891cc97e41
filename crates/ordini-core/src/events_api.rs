//! Client for the daily events API.
//!
//! One unauthenticated-beyond-a-token GET per refresh, with a bounded
//! timeout and no retry; the next scheduled refresh is the only retry
//! mechanism the bot has.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

use ordini_models::DailyEvent;

/// Total request timeout for the events API.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur talking to the events API.
#[derive(Debug, Error)]
pub enum EventsApiError {
    /// Transport failure: timeout, connection error, or a body that is not
    /// valid JSON at all.
    #[error("events API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("events API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The base URL cannot address the events endpoint.
    #[error("invalid events API URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Today's payload from the events API.
///
/// The payload is kept as an opaque value and inspected leniently: any
/// shape without an `event.title` string is treated as "no event today",
/// never as an error.
#[derive(Debug, Clone, Default)]
pub struct EventsToday {
    raw: serde_json::Value,
}

impl EventsToday {
    /// Wraps a raw API payload.
    pub fn from_raw(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    /// The `date` string, if the payload carries one.
    pub fn date(&self) -> Option<&str> {
        self.raw["date"].as_str()
    }

    /// The `event.title` string, if the payload carries one.
    pub fn title(&self) -> Option<&str> {
        self.raw["event"]["title"].as_str()
    }

    /// Converts the payload into a [`DailyEvent`].
    ///
    /// Returns `None` when there is no title, i.e. no event today.
    pub fn into_daily_event(self) -> Option<DailyEvent> {
        let title = self.title()?.to_string();
        let date = self.date().unwrap_or_default().to_string();
        Some(DailyEvent {
            date,
            title,
            raw: self.raw,
        })
    }
}

/// HTTP client for the events API.
///
/// Holds one pooled `reqwest::Client`; cheap to clone.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl EventsClient {
    /// Creates a client for the given base URL and access token.
    ///
    /// # Errors
    /// Fails if the base URL cannot address `/api/events/today` or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: Url, token: impl Into<String>) -> Result<Self, EventsApiError> {
        let endpoint = base_url.join("/api/events/today")?;
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    /// Fetches today's event payload.
    ///
    /// Issues `GET {base}/api/events/today?token={token}` with the bounded
    /// timeout. No retry on failure.
    pub async fn fetch_today(&self) -> Result<EventsToday, EventsApiError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("token", &self.token);

        debug!(url = %self.endpoint, "Fetching today's event");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EventsApiError::Status(status));
        }

        let raw: serde_json::Value = response.json().await?;
        Ok(EventsToday::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_with_event() {
        let today = EventsToday::from_raw(json!({
            "event": {"title": "Pizza Night"},
            "date": "2024-05-01"
        }));

        assert_eq!(today.title(), Some("Pizza Night"));
        assert_eq!(today.date(), Some("2024-05-01"));

        let event = today.into_daily_event().unwrap();
        assert_eq!(event.title, "Pizza Night");
        assert_eq!(event.date, "2024-05-01");
        assert_eq!(event.raw["event"]["title"], "Pizza Night");
    }

    #[test]
    fn test_empty_payload_means_no_event() {
        let today = EventsToday::from_raw(json!({}));
        assert!(today.into_daily_event().is_none());
    }

    #[test]
    fn test_missing_title_means_no_event() {
        let today = EventsToday::from_raw(json!({
            "event": {},
            "date": "2024-05-01"
        }));
        assert!(today.into_daily_event().is_none());
    }

    #[test]
    fn test_unexpected_shape_means_no_event() {
        // A list, a string title of the wrong type, whatever: never an error.
        assert!(EventsToday::from_raw(json!([1, 2, 3])).into_daily_event().is_none());
        assert!(EventsToday::from_raw(json!({"event": {"title": 42}}))
            .into_daily_event()
            .is_none());
    }

    #[test]
    fn test_client_construction() {
        let base = Url::parse("http://localhost:3000").unwrap();
        assert!(EventsClient::new(base, "secret").is_ok());
    }

    #[test]
    fn test_missing_date_defaults_to_empty() {
        let today = EventsToday::from_raw(json!({"event": {"title": "Pizza Night"}}));
        let event = today.into_daily_event().unwrap();
        assert_eq!(event.date, "");
    }
}
