//! # Rexx Focus Core Library
//!
//! This library provides the core business logic for the Rexx Focus
//! productivity timer. It follows a CLI-first philosophy: every operation is
//! available through the standalone `rexx` binary, which is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven countdown state machine with wall-clock
//!   recovery after the process was away
//! - **Stats**: Per-day focus minutes, finished tasks and sessions
//! - **Todos**: A flat task list with an in-memory active pointer
//! - **Settings**: Mode durations, presets, sound and theme
//! - **Storage**: SQLite key-value persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`FocusApp`]: Owns the stores and wires their side effects together
//! - [`TimerEngine`]: Core timer state machine
//! - [`driver::run`]: Async once-per-second tick loop
//! - [`Database`]: Durable key-value store
//! - [`Config`]: Application configuration management

pub mod app;
pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod notify;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod todo;

pub use app::{FocusApp, TimerSnapshot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use driver::DriveOutcome;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{LogNotifier, Notifier, NullNotifier, SoundCue};
pub use settings::{Durations, DurationsPatch, Preset, Settings, Theme};
pub use stats::{DailyStat, StatsHistory, StatsTotals};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use timer::{format_time, TimerEngine, TimerMode};
pub use todo::{Todo, TodoList, ToggleOutcome};
