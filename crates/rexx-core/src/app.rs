//! Application composition.
//!
//! [`FocusApp`] owns the four stores and wires their side effects together:
//! finished countdowns feed the statistics and the notifier, finished todos
//! feed the task counter. Every mutation is followed by a best-effort save
//! of the stores it touched.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::events::Event;
use crate::notify::{completion_message, Notifier, NullNotifier, SoundCue, NOTIFICATION_TITLE};
use crate::settings::{DurationsPatch, Preset, Settings, Theme};
use crate::stats::{DailyStat, StatsHistory};
use crate::storage::persist::{self, KvStore, SETTINGS_KEY, STATS_KEY, TIMER_KEY, TODOS_KEY};
use crate::storage::MemoryStore;
use crate::timer::{format_time, TimerEngine, TimerMode};
use crate::todo::{Todo, TodoList, ToggleOutcome};

/// Render-ready view of the timer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub label: &'static str,
    pub time_left: u32,
    pub display: String,
    pub total_secs: u32,
    pub progress_pct: f64,
    pub is_running: bool,
    pub session_count: u64,
    pub active_todo: Option<String>,
}

pub struct FocusApp {
    settings: Settings,
    timer: TimerEngine,
    stats: StatsHistory,
    todos: TodoList,
    kv: Box<dyn KvStore>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl FocusApp {
    /// Rehydrate every store from `kv`, falling back to defaults.
    ///
    /// Recovery is not run here; call [`FocusApp::recover`] once at startup.
    pub fn load(
        kv: Box<dyn KvStore>,
        notifier: Box<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = persist::load::<Settings>(kv.as_ref(), SETTINGS_KEY)
            .map(Settings::sanitized)
            .unwrap_or_default();
        let timer = persist::load::<TimerEngine>(kv.as_ref(), TIMER_KEY)
            .unwrap_or_else(|| TimerEngine::new(&settings.durations));
        let stats = persist::load::<StatsHistory>(kv.as_ref(), STATS_KEY)
            .map(StatsHistory::normalized)
            .unwrap_or_default();
        let todos = persist::load::<TodoList>(kv.as_ref(), TODOS_KEY).unwrap_or_default();

        tracing::debug!(
            mode = %timer.mode(),
            time_left = timer.time_left(),
            running = timer.is_running(),
            days = stats.records().len(),
            todos = todos.todos().len(),
            "stores loaded"
        );

        Self {
            settings,
            timer,
            stats,
            todos,
            kv,
            notifier,
            clock,
        }
    }

    /// Fresh, unpersisted application on the system clock.
    pub fn in_memory() -> Self {
        Self::load(
            Box::new(MemoryStore::new()),
            Box::new(NullNotifier),
            Arc::new(SystemClock),
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn stats(&self) -> &StatsHistory {
        &self.stats
    }

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn today_stats(&self) -> DailyStat {
        self.stats.today(self.today())
    }

    pub fn last_n_days(&self, n: usize) -> Vec<DailyStat> {
        self.stats.last_n_days(self.today(), n)
    }

    pub fn day_over_day_change_percent(&self) -> i64 {
        self.stats.day_over_day_change_percent(self.today())
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let durations = &self.settings.durations;
        TimerSnapshot {
            mode: self.timer.mode(),
            label: self.timer.mode().label(),
            time_left: self.timer.time_left(),
            display: format_time(self.timer.time_left()),
            total_secs: self.timer.total_secs(durations),
            progress_pct: self.timer.progress_pct(durations),
            is_running: self.timer.is_running(),
            session_count: self.timer.session_count(),
            active_todo: self.todos.active_todo().map(|t| t.text.clone()),
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Reconcile time that passed while the application was not running.
    pub fn recover(&mut self) -> Vec<Event> {
        let events = self.timer.recover(self.clock.now_ms());
        if events.is_empty() {
            return events;
        }
        for event in &events {
            self.on_completed(event);
        }
        self.save_timer();
        events
    }

    /// Start the countdown. A finished countdown is refilled first.
    pub fn start(&mut self) -> Option<Event> {
        let now = self.clock.now_ms();
        if !self.timer.is_running() && self.timer.time_left() == 0 {
            self.timer.reset(&self.settings.durations, now);
        }
        let event = self.timer.start(now)?;
        self.cue(SoundCue::Start);
        self.save_timer();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.timer.pause(self.clock.now_ms())?;
        self.cue(SoundCue::Stop);
        self.save_timer();
        Some(event)
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// One driver tick. Returns the completion event when the countdown ends.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.timer.is_running() {
            return None;
        }
        let event = self.timer.tick(self.clock.now_ms());
        if let Some(ref event) = event {
            self.on_completed(event);
        }
        self.save_timer();
        event
    }

    pub fn reset_timer(&mut self) -> Event {
        let event = self.timer.reset(&self.settings.durations, self.clock.now_ms());
        self.save_timer();
        event
    }

    pub fn set_mode(&mut self, mode: TimerMode) -> Event {
        let event = self
            .timer
            .set_mode(mode, &self.settings.durations, self.clock.now_ms());
        self.save_timer();
        event
    }

    /// Switch to a custom countdown. `minutes` must already be validated.
    pub fn set_custom_duration(&mut self, minutes: u32) -> Event {
        let event = self.timer.set_custom_duration(minutes, self.clock.now_ms());
        self.save_timer();
        event
    }

    fn on_completed(&mut self, event: &Event) {
        let Event::TimerCompleted { mode, .. } = event else {
            return;
        };
        if *mode == TimerMode::Work {
            let today = self.clock.today();
            self.stats
                .add_focus_minutes(today, self.settings.durations.work);
            self.stats.increment_sessions(today);
            self.save_stats();
        }
        self.cue(SoundCue::Finish);
        self.notifier
            .notify(NOTIFICATION_TITLE, completion_message(*mode));
    }

    fn cue(&self, cue: SoundCue) {
        if self.settings.sound_enabled {
            self.notifier.play(cue);
        }
    }

    // ── Todos ────────────────────────────────────────────────────────

    /// Append a todo. `text` must already be trimmed and non-empty.
    pub fn add_todo(&mut self, text: impl Into<String>) -> Todo {
        let todo = self.todos.add(text, self.clock.now()).clone();
        self.save_todos();
        todo
    }

    /// Flip a todo; completing one counts towards today's finished tasks.
    pub fn toggle_todo(&mut self, id: Uuid) -> Option<Event> {
        let outcome = self.todos.toggle(id)?;
        let completed = outcome == ToggleOutcome::Completed;
        if completed {
            self.stats.increment_tasks_completed(self.clock.today());
            self.save_stats();
        }
        self.save_todos();
        Some(Event::TodoToggled {
            todo_id: id,
            completed,
            at: self.clock.now(),
        })
    }

    pub fn delete_todo(&mut self, id: Uuid) -> Option<Todo> {
        let removed = self.todos.delete(id)?;
        self.save_todos();
        Some(removed)
    }

    /// The active pointer is in-memory only, so nothing is saved.
    pub fn set_active_todo(&mut self, id: Option<Uuid>) -> bool {
        self.todos.set_active(id)
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn update_durations(&mut self, patch: DurationsPatch) -> Event {
        self.settings.update_durations(patch);
        self.settings_changed()
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Event {
        self.settings.apply_preset(preset);
        self.settings_changed()
    }

    pub fn reset_settings(&mut self) -> Event {
        self.settings.reset_to_defaults();
        self.settings_changed()
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Event {
        self.settings.set_sound_enabled(enabled);
        self.settings_changed()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Event {
        self.settings.set_theme(theme);
        self.settings_changed()
    }

    fn settings_changed(&self) -> Event {
        self.save_settings();
        tracing::debug!(settings = ?self.settings, "settings changed");
        Event::SettingsChanged {
            at: self.clock.now(),
        }
    }

    // ── Stats ────────────────────────────────────────────────────────

    /// Discard the whole history. Confirmation is the caller's job.
    pub fn reset_stats(&mut self) -> Event {
        self.stats.reset();
        self.save_stats();
        tracing::info!("statistics history cleared");
        Event::StatsReset {
            at: self.clock.now(),
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn save_settings(&self) {
        persist::save(self.kv.as_ref(), SETTINGS_KEY, &self.settings);
    }

    fn save_timer(&self) {
        persist::save(self.kv.as_ref(), TIMER_KEY, &self.timer);
    }

    fn save_stats(&self) {
        persist::save(self.kv.as_ref(), STATS_KEY, &self.stats);
    }

    fn save_todos(&self) {
        persist::save(self.kv.as_ref(), TODOS_KEY, &self.todos);
    }
}
