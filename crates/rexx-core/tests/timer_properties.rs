//! Property tests for the countdown engine and the statistics history.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rexx_core::settings::{clamp_minutes, MAX_MINUTES, MIN_MINUTES};
use rexx_core::{Durations, DurationsPatch, Event, Settings, StatsHistory, TimerEngine, TimerMode};

const BASE_MS: u64 = 1_767_225_600_000;

fn running_engine(time_left: u32, last_tick: u64) -> TimerEngine {
    serde_json::from_value(serde_json::json!({
        "mode": "work",
        "timeLeft": time_left,
        "isRunning": true,
        "customDuration": 2700,
        "sessionCount": 0,
        "lastTick": last_tick,
    }))
    .expect("engine json")
}

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .expect("date")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn tick_decrements_by_one_and_keeps_running(time_left in 1_u32..20_000) {
        let mut engine = running_engine(time_left, BASE_MS);
        let event = engine.tick(BASE_MS + 1_000);
        prop_assert!(event.is_none());
        prop_assert_eq!(engine.time_left(), time_left - 1);
        prop_assert!(engine.is_running());
        prop_assert_eq!(engine.last_tick(), Some(BASE_MS + 1_000));
    }

    #[test]
    fn countdown_completes_exactly_once(minutes in 1_u32..=3) {
        let mut engine = TimerEngine::new(&Durations::default());
        engine.set_custom_duration(minutes, BASE_MS);
        engine.start(BASE_MS);

        let mut completions = 0;
        for i in 1..=(minutes * 60 + 5) {
            if let Some(Event::TimerCompleted { mode, session_count, .. }) =
                engine.tick(BASE_MS + u64::from(i) * 1_000)
            {
                prop_assert_eq!(mode, TimerMode::Custom);
                prop_assert_eq!(session_count, 1);
                completions += 1;
            }
        }
        prop_assert_eq!(completions, 1);
        prop_assert!(!engine.is_running());
        prop_assert_eq!(engine.time_left(), 0);
    }

    #[test]
    fn recovery_subtracts_whole_elapsed_seconds(
        time_left in 1_u32..10_000,
        elapsed_secs in 0_u64..20_000,
        sub_second in 0_u64..1_000,
    ) {
        let mut engine = running_engine(time_left, BASE_MS);
        let now = BASE_MS + elapsed_secs * 1_000 + sub_second;
        let events = engine.recover(now);

        let expected = u64::from(time_left).saturating_sub(elapsed_secs) as u32;
        prop_assert_eq!(engine.time_left(), expected);
        prop_assert_eq!(engine.is_running(), expected > 0);
        let completed = events
            .iter()
            .filter(|e| matches!(e, Event::TimerCompleted { .. }))
            .count();
        prop_assert_eq!(completed, usize::from(expected == 0));
        if expected > 0 {
            prop_assert_eq!(engine.last_tick(), Some(BASE_MS + elapsed_secs * 1_000));
        } else {
            prop_assert_eq!(engine.last_tick(), None);
        }
    }

    #[test]
    fn recovery_ignores_clock_going_backwards(time_left in 1_u32..10_000, back in 1_u64..1_000_000) {
        let mut engine = running_engine(time_left, BASE_MS);
        engine.recover(BASE_MS - back);
        prop_assert_eq!(engine.time_left(), time_left);
        prop_assert!(engine.is_running());
    }

    #[test]
    fn durations_always_clamped(work in any::<i32>(), short in any::<i32>(), long in any::<i32>()) {
        let mut settings = Settings::default();
        settings.update_durations(DurationsPatch {
            work: Some(clamp_minutes(i64::from(work))),
            short_break: Some(clamp_minutes(i64::from(short))),
            long_break: Some(clamp_minutes(i64::from(long))),
        });
        let d = settings.durations;
        for minutes in [d.work, d.short_break, d.long_break] {
            prop_assert!((MIN_MINUTES..=MAX_MINUTES).contains(&minutes));
        }
    }

    #[test]
    fn stats_totals_match_recorded_activity(
        entries in prop::collection::vec((0_u64..30, 1_u32..120), 0..40),
    ) {
        let mut stats = StatsHistory::new();
        let mut expected_minutes = 0_u64;
        for (offset, minutes) in &entries {
            stats.add_focus_minutes(day(*offset), *minutes);
            expected_minutes += u64::from(*minutes);
        }
        prop_assert_eq!(stats.totals().focus_minutes, expected_minutes);

        let mut dates: Vec<_> = stats.records().iter().map(|r| r.date).collect();
        let before = dates.len();
        dates.sort();
        dates.dedup();
        prop_assert_eq!(dates.len(), before);
    }

    #[test]
    fn last_n_days_is_dense_and_ordered(n in 1_usize..60, today_offset in 0_u64..400) {
        let today = day(today_offset);
        let mut stats = StatsHistory::new();
        stats.increment_sessions(today);

        let window = stats.last_n_days(today, n);
        prop_assert_eq!(window.len(), n);
        prop_assert_eq!(window[n - 1].date, today);
        prop_assert_eq!(window[n - 1].sessions, 1);
        for pair in window.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }
}
