//! Notification and sound side effects.
//!
//! Fire-and-forget: nothing a notifier does is reported back to the core.

use crate::timer::TimerMode;

/// Short sound played around timer transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Timer started.
    Start,
    /// Timer paused.
    Stop,
    /// Countdown finished.
    Finish,
}

pub trait Notifier: Send {
    fn play(&self, cue: SoundCue);

    fn notify(&self, title: &str, body: &str);
}

/// Title used for completion banners.
pub const NOTIFICATION_TITLE: &str = "Rexx Focus";

/// Completion banner text for the mode that just finished.
pub fn completion_message(mode: TimerMode) -> &'static str {
    match mode {
        TimerMode::Work => "Work session finished! Time for a break.",
        _ => "Break is over! Time to focus.",
    }
}

/// Writes cues and banners to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn play(&self, cue: SoundCue) {
        tracing::debug!(?cue, "sound cue");
    }

    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn play(&self, _cue: SoundCue) {}

    fn notify(&self, _title: &str, _body: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_depend_on_finished_mode() {
        assert!(completion_message(TimerMode::Work).starts_with("Work"));
        assert_eq!(
            completion_message(TimerMode::ShortBreak),
            completion_message(TimerMode::Custom)
        );
    }
}
