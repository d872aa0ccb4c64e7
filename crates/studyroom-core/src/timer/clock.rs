use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Source of "now" for the manual timer.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle and give the
/// other to a timer.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    origin: DateTime<Utc>,
    offset_secs: Arc<AtomicI64>,
}

impl SteppedClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            offset_secs: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.offset_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Default for SteppedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> DateTime<Utc> {
        self.origin + Duration::seconds(self.offset_secs.load(Ordering::SeqCst))
    }
}
