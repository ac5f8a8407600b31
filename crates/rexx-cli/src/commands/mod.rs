pub mod completions;
pub mod config;
pub mod settings;
pub mod stats;
pub mod timer;
pub mod todo;

use std::sync::Arc;

use rexx_core::{Config, Database, FocusApp, KvStore, MemoryStore, SystemClock};
use serde::Serialize;

use crate::notifier::TerminalNotifier;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Output mode selected by the global `--json` flag.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as pretty JSON, or the text produced by `human`.
    pub fn emit<T: Serialize>(self, value: &T, human: impl FnOnce() -> String) -> CmdResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", human());
        }
        Ok(())
    }
}

/// Open the application and hand it to `f`.
pub fn with_app(
    config: &Config,
    ephemeral: bool,
    f: impl FnOnce(&mut FocusApp) -> CmdResult,
) -> CmdResult {
    let mut app = open_app(config, ephemeral)?;
    f(&mut app)
}

/// Open the stores and reconcile time spent while no process was running.
fn open_app(config: &Config, ephemeral: bool) -> Result<FocusApp, Box<dyn std::error::Error>> {
    let kv: Box<dyn KvStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open_at(&config.database_path()?)?)
    };
    let notifier = TerminalNotifier::from_config(&config.notifications);
    let mut app = FocusApp::load(kv, Box::new(notifier), Arc::new(SystemClock));
    for event in app.recover() {
        tracing::debug!(?event, "startup recovery");
    }
    Ok(app)
}
