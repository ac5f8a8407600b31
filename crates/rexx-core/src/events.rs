use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; the notifier reacts to some of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    /// Fired exactly once per finished countdown.
    TimerCompleted {
        mode: TimerMode,
        session_count: u64,
        at: DateTime<Utc>,
    },
    /// Startup reconciliation of time spent unloaded.
    TimerRecovered {
        elapsed_secs: u64,
        time_left: u32,
        still_running: bool,
        at: DateTime<Utc>,
    },
    /// A todo flipped; only `completed: true` counts towards the stats.
    TodoToggled {
        todo_id: Uuid,
        completed: bool,
        at: DateTime<Utc>,
    },
    StatsReset {
        at: DateTime<Utc>,
    },
    SettingsChanged {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::ModeChanged { at, .. }
            | Event::TimerCompleted { at, .. }
            | Event::TimerRecovered { at, .. }
            | Event::TodoToggled { at, .. }
            | Event::StatsReset { at }
            | Event::SettingsChanged { at } => *at,
        }
    }
}

/// Epoch milliseconds to a UTC timestamp.
pub(crate) fn at(now_ms: u64) -> DateTime<Utc> {
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_serialization() {
        let event = Event::TimerCompleted {
            mode: TimerMode::Work,
            session_count: 3,
            at: at(0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "timer_completed");
        assert_eq!(json["mode"], "work");
        assert_eq!(json["sessionCount"], 3);
        assert!(json.get("session_count").is_none());
    }

    #[test]
    fn at_converts_millis() {
        assert_eq!(at(1_500).timestamp_millis(), 1_500);
        assert_eq!(at(u64::MAX), DateTime::<Utc>::default());
    }
}
