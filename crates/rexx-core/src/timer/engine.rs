//! Timer engine implementation.
//!
//! The timer engine is a one-second countdown state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once per
//! second while the timer runs, and for passing the current wall-clock time
//! (epoch milliseconds) into every time-dependent command.
//!
//! ## State Transitions
//!
//! ```text
//! {work, shortBreak, longBreak, custom} x {running, paused}
//!
//! paused --start--> running --pause--> paused
//! running --tick (timeLeft == 0)--> paused   [emits TimerCompleted once]
//! any --set_mode / reset / set_custom_duration--> paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&durations);
//! engine.start(now_ms);
//! // Once per second:
//! engine.tick(now_ms); // Returns Some(Event::TimerCompleted) when the countdown ends
//! ```

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::events::{at, Event};
use crate::settings::Durations;

/// Initial custom countdown length in seconds.
pub const DEFAULT_CUSTOM_SECS: u32 = 45 * 60;

/// Core timer engine.
///
/// Serialized as the `timer-state` record; `last_tick` is the recovery
/// timestamp and is present exactly while the timer is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEngine {
    mode: TimerMode,
    /// Remaining seconds in the current countdown.
    time_left: u32,
    is_running: bool,
    /// Length of the custom countdown in seconds.
    custom_duration: u32,
    /// Completed countdowns, across all modes.
    #[serde(default)]
    session_count: u64,
    /// Timestamp (ms since epoch) of the last start or tick.
    #[serde(default)]
    last_tick: Option<u64>,
}

impl TimerEngine {
    /// Create a paused engine in work mode with a full work countdown.
    pub fn new(durations: &Durations) -> Self {
        Self {
            mode: TimerMode::Work,
            time_left: durations.work.saturating_mul(60),
            is_running: false,
            custom_duration: DEFAULT_CUSTOM_SECS,
            session_count: 0,
            last_tick: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn custom_duration(&self) -> u32 {
        self.custom_duration
    }

    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Full length in seconds of the current mode's countdown.
    pub fn total_secs(&self, durations: &Durations) -> u32 {
        self.mode
            .configured_secs(durations)
            .unwrap_or(self.custom_duration)
    }

    /// 0.0 .. 100.0 progress within the current countdown.
    ///
    /// Clamped, since durations may change under a countdown in flight.
    pub fn progress_pct(&self, durations: &Durations) -> f64 {
        let total = self.total_secs(durations);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left) as f64;
        (elapsed / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch mode; the countdown is refilled and the timer stops.
    pub fn set_mode(&mut self, mode: TimerMode, durations: &Durations, now_ms: u64) -> Event {
        self.mode = mode;
        self.time_left = self.total_secs(durations);
        self.stop();
        tracing::debug!(mode = %mode, time_left = self.time_left, "timer mode changed");
        Event::ModeChanged {
            mode,
            time_left: self.time_left,
            at: at(now_ms),
        }
    }

    /// Switch to custom mode with a countdown of `minutes`.
    ///
    /// The 1..=240 range is enforced by the caller, see
    /// [`validate_custom_minutes`](crate::timer::validate_custom_minutes).
    pub fn set_custom_duration(&mut self, minutes: u32, now_ms: u64) -> Event {
        let secs = minutes.saturating_mul(60);
        self.mode = TimerMode::Custom;
        self.custom_duration = secs;
        self.time_left = secs;
        self.stop();
        tracing::debug!(minutes, "custom duration set");
        Event::ModeChanged {
            mode: TimerMode::Custom,
            time_left: secs,
            at: at(now_ms),
        }
    }

    /// Start a paused countdown. No-op when already running or at zero.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.is_running || self.time_left == 0 {
            return None;
        }
        self.is_running = true;
        self.last_tick = Some(now_ms);
        Some(Event::TimerStarted {
            mode: self.mode,
            time_left: self.time_left,
            at: at(now_ms),
        })
    }

    /// Pause a running countdown, keeping the remaining time exactly.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.stop();
        Some(Event::TimerPaused {
            mode: self.mode,
            time_left: self.time_left,
            at: at(now_ms),
        })
    }

    /// Refill the current mode's countdown and stop. Mode is unchanged.
    pub fn reset(&mut self, durations: &Durations, now_ms: u64) -> Event {
        self.time_left = self.total_secs(durations);
        self.stop();
        Event::TimerReset {
            mode: self.mode,
            time_left: self.time_left,
            at: at(now_ms),
        }
    }

    /// Advance one second. Returns `Some(Event::TimerCompleted)` on the tick
    /// that stops a running countdown at zero.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        if self.time_left == 0 {
            self.stop();
            return Some(self.complete(now_ms));
        }
        self.time_left -= 1;
        self.last_tick = Some(now_ms);
        None
    }

    /// Reconcile wall-clock time that passed while nothing was ticking.
    ///
    /// Only a running engine with a recovery timestamp is touched. A clock
    /// that went backwards counts as zero elapsed seconds. Returns the
    /// `TimerRecovered` event, followed by `TimerCompleted` when the
    /// countdown ran out in the meantime.
    pub fn recover(&mut self, now_ms: u64) -> Vec<Event> {
        let last = match (self.is_running, self.last_tick) {
            (true, Some(last)) => last,
            _ => return Vec::new(),
        };

        let elapsed_secs = now_ms.saturating_sub(last) / 1000;
        let elapsed = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);
        self.time_left = self.time_left.saturating_sub(elapsed);

        let mut events = Vec::with_capacity(2);
        let still_running = self.time_left > 0;
        if still_running {
            // Advance by whole seconds only so the sub-second remainder is
            // carried into the next recovery. A skewed clock re-anchors.
            self.last_tick = Some(if now_ms < last {
                now_ms
            } else {
                last + elapsed_secs * 1000
            });
        } else {
            self.stop();
        }
        tracing::info!(
            elapsed_secs,
            time_left = self.time_left,
            still_running,
            "timer state recovered"
        );
        events.push(Event::TimerRecovered {
            elapsed_secs,
            time_left: self.time_left,
            still_running,
            at: at(now_ms),
        });
        if !still_running {
            events.push(self.complete(now_ms));
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stop(&mut self) {
        self.is_running = false;
        self.last_tick = None;
    }

    fn complete(&mut self, now_ms: u64) -> Event {
        self.session_count += 1;
        tracing::info!(mode = %self.mode, session_count = self.session_count, "countdown completed");
        Event::TimerCompleted {
            mode: self.mode,
            session_count: self.session_count,
            at: at(now_ms),
        }
    }
}

/// `MM:SS`; minutes grow past two digits for long custom countdowns.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    fn running_engine(time_left: u32) -> TimerEngine {
        let mut engine = TimerEngine::new(&Durations::default());
        engine.time_left = time_left;
        engine.start(T0);
        engine
    }

    #[test]
    fn new_engine_is_paused_work() {
        let engine = TimerEngine::new(&Durations::default());
        assert_eq!(engine.mode(), TimerMode::Work);
        assert_eq!(engine.time_left(), 25 * 60);
        assert!(!engine.is_running());
        assert_eq!(engine.custom_duration(), DEFAULT_CUSTOM_SECS);
        assert_eq!(engine.last_tick(), None);
    }

    #[test]
    fn start_pause_keeps_remaining_time() {
        let mut engine = TimerEngine::new(&Durations::default());
        assert!(engine.start(T0).is_some());
        assert!(engine.is_running());
        assert_eq!(engine.last_tick(), Some(T0));
        assert!(engine.start(T0 + 5).is_none());

        engine.tick(T0 + 1000);
        engine.tick(T0 + 2000);
        assert!(engine.pause(T0 + 2500).is_some());
        assert!(!engine.is_running());
        assert_eq!(engine.last_tick(), None);
        assert_eq!(engine.time_left(), 25 * 60 - 2);
        assert!(engine.pause(T0 + 3000).is_none());
    }

    #[test]
    fn tick_decrements_then_completes_once() {
        let mut engine = running_engine(1);
        assert!(engine.tick(T0 + 1000).is_none());
        assert_eq!(engine.time_left(), 0);
        assert!(engine.is_running());

        let event = engine.tick(T0 + 2000);
        assert!(matches!(
            event,
            Some(Event::TimerCompleted { mode: TimerMode::Work, session_count: 1, .. })
        ));
        assert!(!engine.is_running());
        assert_eq!(engine.last_tick(), None);

        assert!(engine.tick(T0 + 3000).is_none());
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn start_refuses_empty_countdown() {
        let mut engine = running_engine(1);
        engine.tick(T0 + 1000);
        engine.tick(T0 + 2000);
        assert_eq!(engine.time_left(), 0);
        assert!(engine.start(T0 + 3000).is_none());
        assert!(!engine.is_running());
    }

    #[test]
    fn tick_while_paused_is_ignored() {
        let mut engine = TimerEngine::new(&Durations::default());
        assert!(engine.tick(T0).is_none());
        assert_eq!(engine.time_left(), 25 * 60);
    }

    #[test]
    fn mode_switch_refills_and_stops() {
        let durations = Durations::default();
        let mut engine = running_engine(10);
        engine.set_mode(TimerMode::LongBreak, &durations, T0);
        assert_eq!(engine.mode(), TimerMode::LongBreak);
        assert_eq!(engine.time_left(), 15 * 60);
        assert!(!engine.is_running());
        assert_eq!(engine.last_tick(), None);
    }

    #[test]
    fn custom_mode_keeps_its_own_duration() {
        let durations = Durations::default();
        let mut engine = TimerEngine::new(&durations);
        engine.set_custom_duration(50, T0);
        assert_eq!(engine.mode(), TimerMode::Custom);
        assert_eq!(engine.time_left(), 50 * 60);

        engine.set_mode(TimerMode::Work, &durations, T0);
        engine.set_mode(TimerMode::Custom, &durations, T0);
        assert_eq!(engine.time_left(), 50 * 60);
    }

    #[test]
    fn reset_refills_without_changing_mode() {
        let durations = Durations::default();
        let mut engine = TimerEngine::new(&durations);
        engine.set_mode(TimerMode::ShortBreak, &durations, T0);
        engine.start(T0);
        engine.tick(T0 + 1000);
        engine.reset(&durations, T0 + 1500);
        assert_eq!(engine.mode(), TimerMode::ShortBreak);
        assert_eq!(engine.time_left(), 5 * 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn recover_with_no_elapsed_time_is_a_noop() {
        let mut engine = running_engine(300);
        let events = engine.recover(T0 + 999);
        assert_eq!(engine.time_left(), 300);
        assert!(engine.is_running());
        assert_eq!(engine.last_tick(), Some(T0));
        assert!(matches!(
            events.as_slice(),
            [Event::TimerRecovered { elapsed_secs: 0, still_running: true, .. }]
        ));
    }

    #[test]
    fn recover_subtracts_whole_seconds() {
        let mut engine = running_engine(300);
        engine.recover(T0 + 61_500);
        assert_eq!(engine.time_left(), 239);
        assert!(engine.is_running());
        assert_eq!(engine.last_tick(), Some(T0 + 61_000));
    }

    #[test]
    fn repeated_recovery_keeps_sub_second_remainder() {
        let mut engine = running_engine(300);
        for step in 1..=10 {
            engine.recover(T0 + step * 700);
        }
        // 7 s of wall-clock time in 700 ms slices.
        assert_eq!(engine.time_left(), 293);
        assert_eq!(engine.last_tick(), Some(T0 + 7_000));
    }

    #[test]
    fn recover_clamps_at_zero_and_completes() {
        let mut engine = running_engine(5);
        let events = engine.recover(T0 + 10_000);
        assert_eq!(engine.time_left(), 0);
        assert!(!engine.is_running());
        assert_eq!(engine.last_tick(), None);
        assert_eq!(engine.session_count(), 1);
        assert!(matches!(events.last(), Some(Event::TimerCompleted { .. })));
    }

    #[test]
    fn recover_tolerates_clock_skew() {
        let mut engine = running_engine(120);
        engine.recover(T0 - 3_600_000);
        assert_eq!(engine.time_left(), 120);
        assert!(engine.is_running());
        assert_eq!(engine.last_tick(), Some(T0 - 3_600_000));
    }

    #[test]
    fn recover_ignores_paused_engine() {
        let mut engine = TimerEngine::new(&Durations::default());
        assert!(engine.recover(T0 + 1_000_000).is_empty());
        assert_eq!(engine.time_left(), 25 * 60);
    }

    #[test]
    fn persisted_record_uses_camel_case() {
        let engine = running_engine(42);
        let json = serde_json::to_value(&engine).unwrap();
        assert_eq!(json["mode"], "work");
        assert_eq!(json["timeLeft"], 42);
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["customDuration"], DEFAULT_CUSTOM_SECS);
        assert_eq!(json["sessionCount"], 0);
        assert_eq!(json["lastTick"], T0);
    }

    #[test]
    fn progress_and_format() {
        let durations = Durations::default();
        let mut engine = TimerEngine::new(&durations);
        assert_eq!(engine.progress_pct(&durations), 0.0);
        engine.time_left = 15 * 60;
        assert!((engine.progress_pct(&durations) - 40.0).abs() < 1e-9);
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(240 * 60), "240:00");
    }
}
