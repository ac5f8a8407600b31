use clap::{Subcommand, ValueEnum};
use rexx_core::settings::clamp_minutes;
use rexx_core::{DurationsPatch, FocusApp, Preset, Settings, Theme};

use super::{CmdResult, Output};

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings
    Show,
    /// Change mode durations in minutes (clamped to 1-240)
    Durations {
        #[arg(long, allow_hyphen_values = true)]
        work: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        short_break: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        long_break: Option<i64>,
    },
    /// Apply a preset: classic, deep-work or sprint
    Preset { preset: Preset },
    /// Turn sound cues on or off
    Sound {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Pick a color theme
    Theme { theme: Theme },
    /// Restore default settings
    Reset,
}

fn describe(settings: &Settings) -> String {
    let d = &settings.durations;
    format!(
        "work: {} min\nshort break: {} min\nlong break: {} min\nsound: {}\ntheme: {}",
        d.work,
        d.short_break,
        d.long_break,
        if settings.sound_enabled { "on" } else { "off" },
        settings.theme
    )
}

pub fn run(app: &mut FocusApp, action: SettingsAction, out: Output) -> CmdResult {
    match action {
        SettingsAction::Show => {}
        SettingsAction::Durations {
            work,
            short_break,
            long_break,
        } => {
            let patch = DurationsPatch {
                work: work.map(clamp_minutes),
                short_break: short_break.map(clamp_minutes),
                long_break: long_break.map(clamp_minutes),
            };
            if !patch.is_empty() {
                app.update_durations(patch);
            }
        }
        SettingsAction::Preset { preset } => {
            app.apply_preset(preset);
        }
        SettingsAction::Sound { state } => {
            app.set_sound_enabled(matches!(state, Switch::On));
        }
        SettingsAction::Theme { theme } => {
            app.set_theme(theme);
        }
        SettingsAction::Reset => {
            app.reset_settings();
        }
    }
    let settings = app.settings();
    out.emit(settings, || describe(settings))
}
