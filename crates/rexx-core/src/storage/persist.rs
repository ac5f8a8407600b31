//! Persistence adapter between the pure stores and a key-value backend.
//!
//! Loading tolerates missing and corrupt records; saving is best-effort and
//! never reports failure to the caller. The in-memory value stays
//! authoritative for the rest of the session either way.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const SETTINGS_KEY: &str = "settings";
pub const TIMER_KEY: &str = "timer-state";
pub const STATS_KEY: &str = "stats";
pub const TODOS_KEY: &str = "todos";

/// Durable string-to-string storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode the record under `key`.
///
/// `None` when the key is absent, unreadable, or does not decode.
pub fn load<T: DeserializeOwned>(kv: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted record");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt persisted record");
            None
        }
    }
}

/// Encode and write `value` under `key`. Returns whether the write landed.
pub fn save<T: Serialize + ?Sized>(kv: &dyn KvStore, key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode record");
            return false;
        }
    };
    match kv.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to persist record");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_and_corrupt_records_load_as_none() {
        let kv = MemoryStore::new();
        assert!(load::<Settings>(&kv, SETTINGS_KEY).is_none());
        kv.set(SETTINGS_KEY, "{not json").unwrap();
        assert!(load::<Settings>(&kv, SETTINGS_KEY).is_none());
    }

    #[test]
    fn save_then_load() {
        let kv = MemoryStore::new();
        let mut settings = Settings::default();
        settings.set_sound_enabled(false);
        assert!(save(&kv, SETTINGS_KEY, &settings));
        assert_eq!(load::<Settings>(&kv, SETTINGS_KEY), Some(settings));
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let kv = MemoryStore::new();
        kv.set_fail_writes(true);
        assert!(!save(&kv, SETTINGS_KEY, &Settings::default()));
    }
}
