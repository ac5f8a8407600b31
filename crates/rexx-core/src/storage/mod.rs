mod config;
pub mod database;
pub mod memory;
pub mod persist;

pub use config::{Config, LogConfig, NotificationsConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use persist::{KvStore, SETTINGS_KEY, STATS_KEY, TIMER_KEY, TODOS_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/rexx[-dev]/` based on REXX_ENV.
///
/// Set REXX_ENV=dev to use development data directory, or REXX_DATA_DIR to
/// point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("REXX_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("REXX_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("rexx-dev")
            } else {
                base_dir.join("rexx")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
