use clap::Subcommand;
use rexx_core::stats::WEEK_DAYS;
use rexx_core::{DailyStat, FocusApp};
use serde::Serialize;

use super::{CmdResult, Output};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// One record per day, oldest first
    Week {
        /// Number of days ending today
        #[arg(long, default_value_t = WEEK_DAYS as u64, value_parser = clap::value_parser!(u64).range(1..=366))]
        days: u64,
    },
    /// Today's focus minutes against yesterday's
    Compare,
    /// Totals over the whole history
    All,
    /// Delete the whole history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Comparison {
    today: u32,
    yesterday: u32,
    change_percent: i64,
}

fn day_line(day: &DailyStat) -> String {
    format!(
        "{}  {:>4} min  {:>3} tasks  {:>3} sessions",
        day.date.format("%a %Y-%m-%d"),
        day.focus_minutes,
        day.tasks_completed,
        day.sessions
    )
}

pub fn run(app: &mut FocusApp, action: StatsAction, out: Output) -> CmdResult {
    match action {
        StatsAction::Today => {
            let today = app.today_stats();
            out.emit(&today, || day_line(&today))
        }
        StatsAction::Week { days } => {
            let window = app.last_n_days(days as usize);
            out.emit(&window, || {
                let total: u32 = window.iter().map(|d| d.focus_minutes).sum();
                let mut lines: Vec<String> = window.iter().map(day_line).collect();
                lines.push(format!("total: {total} min"));
                lines.join("\n")
            })
        }
        StatsAction::Compare => {
            let days = app.last_n_days(2);
            let comparison = Comparison {
                yesterday: days[0].focus_minutes,
                today: days[1].focus_minutes,
                change_percent: app.day_over_day_change_percent(),
            };
            out.emit(&comparison, || {
                format!(
                    "today {} min, yesterday {} min ({:+}%)",
                    comparison.today, comparison.yesterday, comparison.change_percent
                )
            })
        }
        StatsAction::All => {
            let totals = app.stats().totals();
            out.emit(&totals, || {
                format!(
                    "{} min focused, {} tasks, {} sessions over {} active days",
                    totals.focus_minutes, totals.tasks_completed, totals.sessions, totals.active_days
                )
            })
        }
        StatsAction::Reset { yes } => {
            if !yes {
                return Err("refusing to delete statistics without --yes".into());
            }
            let event = app.reset_stats();
            out.emit(&event, || "statistics cleared".to_string())
        }
    }
}
