//! Daily schedule: morning refresh, evening cutover.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Local, Weekday};
use ordini_models::GatingState;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::gate::display_date;
use crate::state::BotState;

/// Wall-clock time of the morning refresh.
const OPENING_HOUR: u32 = 8;
const OPENING_MINUTE: u32 = 0;

/// Wall-clock time of the evening cutover.
const CLOSING_HOUR: u32 = 20;
const CLOSING_MINUTE: u32 = 0;

/// Weekday that gets the welcome greeting instead of the gate's own
/// announcement.
const WELCOME_WEEKDAY: Weekday = Weekday::Mon;

/// What a wake-up is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Open,
    Close,
}

/// Computes the next future occurrence of `hour:minute` local time.
///
/// Always strictly in the future: a process started after today's slot
/// rolls to tomorrow instead of firing immediately. A nonexistent local
/// time (DST gap) rolls forward a day as well.
pub fn next_occurrence(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    let mut date = now.date_naive();
    for _ in 0..4 {
        if let Some(naive) = date.and_hms_opt(hour, minute, 0) {
            if naive > now.naive_local() {
                if let Some(instant) = naive.and_local_timezone(Local).earliest() {
                    return instant;
                }
            }
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    now + ChronoDuration::minutes(1)
}

/// The next wake-up from `now`: the earlier of the opening and closing
/// slots.
fn next_wake(now: DateTime<Local>) -> (DateTime<Local>, Wake) {
    let open_at = next_occurrence(now, OPENING_HOUR, OPENING_MINUTE);
    let close_at = next_occurrence(now, CLOSING_HOUR, CLOSING_MINUTE);

    if open_at <= close_at {
        (open_at, Wake::Open)
    } else {
        (close_at, Wake::Close)
    }
}

/// Runs the schedule for the lifetime of the process.
///
/// Sleeps until each computed wake instant; a message on `shutdown` ends
/// the loop cleanly.
pub async fn run(state: Arc<BotState>, mut shutdown: mpsc::Receiver<()>) {
    loop {
        let now = Local::now();
        let (wake_at, wake) = next_wake(now);
        let delay = (wake_at - now).to_std().unwrap_or(Duration::ZERO);
        debug!(wake_at = %wake_at, wake = ?wake, "Scheduler sleeping");

        tokio::select! {
            _ = sleep(delay) => {}
            _ = shutdown.recv() => {
                info!("Scheduler shutting down");
                return;
            }
        }

        match wake {
            Wake::Open => {
                if Local::now().weekday() == WELCOME_WEEKDAY {
                    // Silent refresh, then greet with whatever state resulted.
                    state.gate.refresh(false, &state.announcer).await;
                    let snapshot = state.gate.snapshot().await;
                    state.announcer.announce(&welcome_announcement(&snapshot)).await;
                } else {
                    state.gate.refresh(true, &state.announcer).await;
                }
            }
            Wake::Close => {
                state.gate.force_close().await;
            }
        }
    }
}

/// The start-of-week greeting, built from the refreshed gating state.
pub fn welcome_announcement(state: &GatingState) -> String {
    match &state.event {
        Some(event) => format!(
            "👋 Bentornati, si riparte!\n\
            🗓 Data: {}\n\
            🎉 Evento del giorno: {}\n\n\
            Usa /ordina per fare un ordine 🍕",
            display_date(&event.date),
            event.title
        ),
        None => "👋 Bentornati, si riparte!\nNessun evento in programma per oggi.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ordini_models::DailyEvent;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_next_occurrence_later_today() {
        let now = local(2024, 5, 1, 6, 30);
        let next = next_occurrence(now, 8, 0);

        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive());
    }

    #[test]
    fn test_next_occurrence_rolls_to_tomorrow() {
        let now = local(2024, 5, 1, 9, 0);
        let next = next_occurrence(now, 8, 0);

        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_next_occurrence_exact_slot_rolls_over() {
        let now = local(2024, 5, 1, 8, 0);
        let next = next_occurrence(now, 8, 0);

        // Firing "now" again would double-run the slot.
        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_next_wake_prefers_morning() {
        let (wake_at, wake) = next_wake(local(2024, 5, 1, 6, 0));
        assert_eq!(wake, Wake::Open);
        assert_eq!(wake_at, local(2024, 5, 1, 8, 0));
    }

    #[test]
    fn test_next_wake_midday_is_cutover() {
        let (wake_at, wake) = next_wake(local(2024, 5, 1, 12, 0));
        assert_eq!(wake, Wake::Close);
        assert_eq!(wake_at, local(2024, 5, 1, 20, 0));
    }

    #[test]
    fn test_next_wake_evening_rolls_to_morning() {
        let (wake_at, wake) = next_wake(local(2024, 5, 1, 21, 0));
        assert_eq!(wake, Wake::Open);
        assert_eq!(wake_at, local(2024, 5, 2, 8, 0));
    }

    #[test]
    fn test_welcome_announcement_with_event() {
        let state = GatingState::open_for(DailyEvent::new("2024-05-06", "Pizza Night"));
        let message = welcome_announcement(&state);

        assert!(message.contains("Pizza Night"));
        assert!(message.contains("2024-05-06"));
    }

    #[test]
    fn test_welcome_announcement_without_event() {
        let message = welcome_announcement(&GatingState::closed());
        assert!(message.contains("Nessun evento"));
    }
}
