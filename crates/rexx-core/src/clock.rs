//! Wall-clock seam.
//!
//! Every time-dependent store operation takes "now" as a parameter; the
//! application reads it from a [`Clock`] so tests can pin it.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// The user's current calendar date.
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc> {
        crate::events::at(self.now_ms())
    }
}

/// The system clock; calendar dates are taken in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock. Dates are derived from the instant in UTC.
///
/// Clones share the same instant, so a test can keep a handle while the
/// application owns another.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now_ms: Arc<AtomicU64>,
}

impl FixedClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(now_ms)),
        }
    }

    /// Clock pinned at `date` + `hms` UTC.
    pub fn at(date: NaiveDate, hour: u32, min: u32, sec: u32) -> Self {
        let ms = date
            .and_hms_opt(hour, min, sec)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        Self::new(u64::try_from(ms).unwrap_or(0))
    }

    pub fn set_ms(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, delta: u64) {
        self.now_ms.fetch_add(delta, Ordering::SeqCst);
    }

    /// Move backwards, as a skewed wall clock would.
    pub fn rewind_ms(&self, delta: u64) {
        let current = self.now_ms.load(Ordering::SeqCst);
        self.set_ms(current.saturating_sub(delta));
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
