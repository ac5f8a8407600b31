mod engine;
mod mode;

pub use engine::{format_time, TimerEngine, DEFAULT_CUSTOM_SECS};
pub use mode::TimerMode;

use crate::error::ValidationError;
use crate::settings::{MAX_MINUTES, MIN_MINUTES};

/// Check a custom countdown request before it reaches the engine.
pub fn validate_custom_minutes(minutes: i64) -> Result<u32, ValidationError> {
    if (MIN_MINUTES as i64..=MAX_MINUTES as i64).contains(&minutes) {
        Ok(minutes as u32)
    } else {
        Err(ValidationError::MinutesOutOfRange {
            field: "custom duration".into(),
            minutes,
        })
    }
}
