use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::settings::Durations;

/// Countdown mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
    Custom,
}

impl TimerMode {
    pub const ALL: [TimerMode; 4] = [
        TimerMode::Work,
        TimerMode::ShortBreak,
        TimerMode::LongBreak,
        TimerMode::Custom,
    ];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
            TimerMode::Custom => "Custom",
        }
    }

    /// Kebab-case identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short-break",
            TimerMode::LongBreak => "long-break",
            TimerMode::Custom => "custom",
        }
    }

    /// Configured duration in seconds for the three preset modes.
    ///
    /// `Custom` has no configured duration; the engine keeps its own.
    pub fn configured_secs(self, durations: &Durations) -> Option<u32> {
        let minutes = match self {
            TimerMode::Work => durations.work,
            TimerMode::ShortBreak => durations.short_break,
            TimerMode::LongBreak => durations.long_break,
            TimerMode::Custom => return None,
        };
        Some(minutes.saturating_mul(60))
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(TimerMode::Work),
            "short-break" | "shortbreak" | "short" => Ok(TimerMode::ShortBreak),
            "long-break" | "longbreak" | "long" => Ok(TimerMode::LongBreak),
            "custom" => Ok(TimerMode::Custom),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_and_camel_spellings() {
        assert_eq!("short-break".parse::<TimerMode>(), Ok(TimerMode::ShortBreak));
        assert_eq!("shortBreak".parse::<TimerMode>(), Ok(TimerMode::ShortBreak));
        assert_eq!("Long".parse::<TimerMode>(), Ok(TimerMode::LongBreak));
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&TimerMode::LongBreak).unwrap();
        assert_eq!(json, "\"longBreak\"");
    }

    #[test]
    fn custom_has_no_configured_duration() {
        let durations = Durations::default();
        assert_eq!(TimerMode::Work.configured_secs(&durations), Some(25 * 60));
        assert_eq!(TimerMode::Custom.configured_secs(&durations), None);
    }
}
