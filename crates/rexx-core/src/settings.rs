//! User settings: countdown durations, sound, theme and named presets.
//!
//! Persisted as the `settings` record. Durations are minutes and always sit
//! inside `MIN_MINUTES..=MAX_MINUTES`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 240;

/// Clamp a requested minute value into the accepted window.
pub fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32
}

/// Minutes per preset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Durations {
    #[serde(default = "default_work")]
    pub work: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
}

fn default_work() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: default_work(),
            short_break: default_short_break(),
            long_break: default_long_break(),
        }
    }
}

/// Partial duration update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationsPatch {
    pub work: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
}

impl DurationsPatch {
    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.short_break.is_none() && self.long_break.is_none()
    }
}

/// Named duration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    Classic,
    DeepWork,
    Sprint,
}

impl Preset {
    pub fn durations(self) -> Durations {
        let (work, short_break, long_break) = match self {
            Preset::Classic => (25, 5, 15),
            Preset::DeepWork => (90, 15, 30),
            Preset::Sprint => (15, 3, 10),
        };
        Durations {
            work,
            short_break,
            long_break,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::DeepWork => "deep-work",
            Preset::Sprint => "sprint",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Preset::Classic),
            "deep-work" | "deepwork" | "deep_work" => Ok(Preset::DeepWork),
            "sprint" => Ok(Preset::Sprint),
            _ => Err(ValidationError::UnknownPreset(s.to_string())),
        }
    }
}

/// Colour theme identifier. Rendering is up to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Sunset,
    Ocean,
    Forest,
    Nebula,
    Classic,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Sunset,
        Theme::Ocean,
        Theme::Forest,
        Theme::Nebula,
        Theme::Classic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Sunset => "sunset",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Nebula => "nebula",
            Theme::Classic => "classic",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownTheme(s.to_string()))
    }
}

/// The `settings` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub durations: Durations,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub theme: Theme,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            sound_enabled: true,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Merge the provided fields into the current durations.
    ///
    /// Values are clamped into range here as well, so a record loaded from
    /// an older store cannot carry a zero duration forward.
    pub fn update_durations(&mut self, patch: DurationsPatch) {
        let clamp = |m: u32| clamp_minutes(m as i64);
        if let Some(work) = patch.work {
            self.durations.work = clamp(work);
        }
        if let Some(short_break) = patch.short_break {
            self.durations.short_break = clamp(short_break);
        }
        if let Some(long_break) = patch.long_break {
            self.durations.long_break = clamp(long_break);
        }
    }

    /// Overwrite all three durations at once.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.durations = preset.durations();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Bring durations from an untrusted record back into range.
    pub(crate) fn sanitized(mut self) -> Self {
        self.update_durations(DurationsPatch {
            work: Some(self.durations.work),
            short_break: Some(self.durations.short_break),
            long_break: Some(self.durations.long_break),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut settings = Settings::default();
        settings.update_durations(DurationsPatch {
            short_break: Some(7),
            ..Default::default()
        });
        assert_eq!(
            settings.durations,
            Durations {
                work: 25,
                short_break: 7,
                long_break: 15
            }
        );
    }

    #[test]
    fn update_clamps_out_of_range() {
        let mut settings = Settings::default();
        settings.update_durations(DurationsPatch {
            work: Some(0),
            long_break: Some(999),
            ..Default::default()
        });
        assert_eq!(settings.durations.work, 1);
        assert_eq!(settings.durations.long_break, 240);
    }

    #[test]
    fn deep_work_preset_sets_all_three() {
        let mut settings = Settings::default();
        settings.update_durations(DurationsPatch {
            work: Some(40),
            ..Default::default()
        });
        settings.apply_preset(Preset::DeepWork);
        assert_eq!(
            settings.durations,
            Durations {
                work: 90,
                short_break: 15,
                long_break: 30
            }
        );
    }

    #[test]
    fn reset_restores_everything() {
        let mut settings = Settings::default();
        settings.apply_preset(Preset::Sprint);
        settings.set_sound_enabled(false);
        settings.set_theme(Theme::Nebula);
        settings.reset_to_defaults();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme, Theme::Sunset);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn parses_names() {
        assert_eq!("deepWork".parse::<Preset>(), Ok(Preset::DeepWork));
        assert_eq!("deep-work".parse::<Preset>(), Ok(Preset::DeepWork));
        assert_eq!("Ocean".parse::<Theme>(), Ok(Theme::Ocean));
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn record_layout() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["durations"]["shortBreak"], 5);
        assert_eq!(json["soundEnabled"], true);
        assert_eq!(json["theme"], "sunset");
    }

    #[test]
    fn sanitized_fixes_zero_duration() {
        let raw = r#"{"durations":{"work":0,"shortBreak":5,"longBreak":15},"soundEnabled":false,"theme":"forest"}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.durations.work, 1);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.theme, Theme::Forest);
    }
}
