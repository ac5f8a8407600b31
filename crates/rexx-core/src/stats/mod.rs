//! Statistics module for Rexx Focus
//!
//! Daily counters (focus minutes, completed tasks, completed work sessions)
//! keyed by calendar date, with rolling-window and day-over-day queries.

mod history;

pub use history::{DailyStat, StatsHistory, StatsTotals, WEEK_DAYS};
