//! Once-per-second tick driver.
//!
//! The timer engine never schedules itself; this loop feeds it ticks while
//! it runs and stops on completion, on an external pause, or when the
//! shutdown future resolves.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::app::FocusApp;
use crate::events::Event;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub enum DriveOutcome {
    /// The countdown reached zero; carries the completion event.
    Completed(Event),
    /// The timer was not running, or stopped without completing.
    Stopped,
    /// Shutdown was requested; the timer has been paused.
    Interrupted,
}

/// Drive `app` until the countdown finishes or `shutdown` resolves.
///
/// `on_tick` sees the application after every tick, including the final one.
pub async fn run<S, F>(app: &mut FocusApp, shutdown: S, mut on_tick: F) -> DriveOutcome
where
    S: Future<Output = ()>,
    F: FnMut(&FocusApp),
{
    if !app.is_running() {
        return DriveOutcome::Stopped;
    }

    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    interval.tick().await;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                app.pause();
                tracing::info!(time_left = app.timer().time_left(), "driver interrupted");
                return DriveOutcome::Interrupted;
            }
            _ = interval.tick() => {
                if !app.is_running() {
                    return DriveOutcome::Stopped;
                }
                let completed = app.tick();
                on_tick(app);
                if let Some(event) = completed {
                    return DriveOutcome::Completed(event);
                }
            }
        }
    }
}
