use std::io::Write;

use clap::Subcommand;
use rexx_core::driver::{self, DriveOutcome};
use rexx_core::timer::validate_custom_minutes;
use rexx_core::{Event, FocusApp, TimerMode, TimerSnapshot};

use super::{todo::resolve_todo, CmdResult, Output};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state
    Status,
    /// Start the countdown (a finished one is refilled first)
    Start,
    /// Pause the countdown
    Pause,
    /// Refill the current mode's countdown
    Reset,
    /// Switch mode: work, short-break, long-break or custom
    Mode { mode: TimerMode },
    /// Switch to a custom countdown of the given minutes (1-240)
    Custom {
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
    /// Run the countdown in the foreground until it finishes or Ctrl-C
    Run {
        /// Todo to focus on (id or unique id prefix)
        #[arg(long)]
        todo: Option<String>,
    },
}

fn status_line(snapshot: &TimerSnapshot) -> String {
    let state = if snapshot.is_running { "running" } else { "paused" };
    let mut line = format!(
        "{}  {}  [{}]  {:.0}%  sessions: {}",
        snapshot.label, snapshot.display, state, snapshot.progress_pct, snapshot.session_count
    );
    if let Some(todo) = &snapshot.active_todo {
        line.push_str(&format!("\nfocus: {todo}"));
    }
    line
}

fn emit_event(out: Output, app: &FocusApp, event: Option<Event>) -> CmdResult {
    match event {
        Some(event) if out.json => out.emit(&event, String::new),
        _ => out.emit(&app.snapshot(), || status_line(&app.snapshot())),
    }
}

pub fn run(app: &mut FocusApp, action: TimerAction, out: Output) -> CmdResult {
    match action {
        TimerAction::Status => out.emit(&app.snapshot(), || status_line(&app.snapshot())),
        TimerAction::Start => {
            let event = app.start();
            emit_event(out, app, event)
        }
        TimerAction::Pause => {
            let event = app.pause();
            emit_event(out, app, event)
        }
        TimerAction::Reset => {
            let event = app.reset_timer();
            emit_event(out, app, Some(event))
        }
        TimerAction::Mode { mode } => {
            let event = app.set_mode(mode);
            emit_event(out, app, Some(event))
        }
        TimerAction::Custom { minutes } => {
            let minutes = validate_custom_minutes(minutes)?;
            let event = app.set_custom_duration(minutes);
            emit_event(out, app, Some(event))
        }
        TimerAction::Run { todo } => run_foreground(app, todo, out),
    }
}

fn run_foreground(app: &mut FocusApp, todo: Option<String>, out: Output) -> CmdResult {
    if let Some(prefix) = todo {
        let id = resolve_todo(app, &prefix)?;
        app.set_active_todo(Some(id));
    }
    app.start();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let outcome = runtime.block_on(driver::run(app, shutdown, |app| {
        if !out.json {
            let snapshot = app.snapshot();
            let mut stdout = std::io::stdout();
            let _ = write!(stdout, "\r{}  {}  ", snapshot.label, snapshot.display);
            let _ = stdout.flush();
        }
    }));
    if !out.json {
        println!();
    }

    match outcome {
        DriveOutcome::Completed(event) => out.emit(&event, || status_line(&app.snapshot())),
        DriveOutcome::Stopped | DriveOutcome::Interrupted => {
            out.emit(&app.snapshot(), || status_line(&app.snapshot()))
        }
    }
}
