//! Daily statistics history.
//!
//! One record per calendar date, created lazily by the first event that
//! touches that date. "Today" is always passed in by the caller.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default window for [`StatsHistory::last_n_days`].
pub const WEEK_DAYS: usize = 7;

/// Counters for a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default)]
    pub focus_minutes: u32,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub sessions: u32,
}

impl DailyStat {
    /// A zero-valued record for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            focus_minutes: 0,
            tasks_completed: 0,
            sessions: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.focus_minutes == 0 && self.tasks_completed == 0 && self.sessions == 0
    }
}

/// All-time sums over the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTotals {
    pub focus_minutes: u64,
    pub tasks_completed: u64,
    pub sessions: u64,
    pub active_days: usize,
}

/// The `stats` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsHistory {
    #[serde(default)]
    history: Vec<DailyStat>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw records in insertion order.
    pub fn records(&self) -> &[DailyStat] {
        &self.history
    }

    pub fn add_focus_minutes(&mut self, today: NaiveDate, minutes: u32) {
        let day = self.upsert(today);
        day.focus_minutes = day.focus_minutes.saturating_add(minutes);
    }

    pub fn increment_tasks_completed(&mut self, today: NaiveDate) {
        let day = self.upsert(today);
        day.tasks_completed = day.tasks_completed.saturating_add(1);
    }

    pub fn increment_sessions(&mut self, today: NaiveDate) {
        let day = self.upsert(today);
        day.sessions = day.sessions.saturating_add(1);
    }

    /// Today's record, or a zero record. Never creates an entry.
    pub fn today(&self, today: NaiveDate) -> DailyStat {
        self.get(today).unwrap_or_else(|| DailyStat::empty(today))
    }

    pub fn get(&self, date: NaiveDate) -> Option<DailyStat> {
        self.history.iter().find(|d| d.date == date).copied()
    }

    /// Exactly `n` records ending at `today`, oldest first. Days without
    /// activity come back as zero records.
    pub fn last_n_days(&self, today: NaiveDate, n: usize) -> Vec<DailyStat> {
        (0..n)
            .rev()
            .map(|days_ago| {
                let date = today
                    .checked_sub_days(Days::new(days_ago as u64))
                    .unwrap_or(NaiveDate::MIN);
                self.today(date)
            })
            .collect()
    }

    /// Today's focus minutes against yesterday's, as a rounded percentage.
    ///
    /// Yesterday at zero yields 0 when today is also zero and 100 otherwise.
    pub fn day_over_day_change_percent(&self, today: NaiveDate) -> i64 {
        let today_minutes = self.today(today).focus_minutes as f64;
        let yesterday_minutes = today
            .pred_opt()
            .map(|yesterday| self.today(yesterday).focus_minutes)
            .unwrap_or(0) as f64;

        if yesterday_minutes == 0.0 {
            return if today_minutes > 0.0 { 100 } else { 0 };
        }
        // Half-way values round toward positive infinity.
        ((today_minutes - yesterday_minutes) * 100.0 / yesterday_minutes + 0.5).floor() as i64
    }

    pub fn totals(&self) -> StatsTotals {
        self.history
            .iter()
            .fold(StatsTotals::default(), |mut acc, day| {
                acc.focus_minutes += day.focus_minutes as u64;
                acc.tasks_completed += day.tasks_completed as u64;
                acc.sessions += day.sessions as u64;
                if !day.is_empty() {
                    acc.active_days += 1;
                }
                acc
            })
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Collapse duplicate dates from a hand-edited or legacy record.
    pub(crate) fn normalized(mut self) -> Self {
        let mut merged: Vec<DailyStat> = Vec::with_capacity(self.history.len());
        for day in self.history.drain(..) {
            match merged.iter_mut().find(|d| d.date == day.date) {
                Some(existing) => {
                    existing.focus_minutes = existing.focus_minutes.saturating_add(day.focus_minutes);
                    existing.tasks_completed =
                        existing.tasks_completed.saturating_add(day.tasks_completed);
                    existing.sessions = existing.sessions.saturating_add(day.sessions);
                }
                None => merged.push(day),
            }
        }
        self.history = merged;
        self
    }

    fn upsert(&mut self, date: NaiveDate) -> &mut DailyStat {
        let index = match self.history.iter().position(|d| d.date == date) {
            Some(index) => index,
            None => {
                self.history.push(DailyStat::empty(date));
                self.history.len() - 1
            }
        };
        &mut self.history[index]
    }
}
