//! Clock seam for timer computation.
//!
//! Timer expiry is pure arithmetic over timestamps, so the engine takes its
//! notion of "now" through a trait. Production code uses `SystemClock`;
//! tests drive `ManualClock` forward without sleeping.

use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    #[must_use]
    pub fn new(start: OffsetDateTime) -> Self {
        Self { now: Mutex::new(start) }
    }

    /// Create a clock frozen at the unix epoch.
    #[must_use]
    pub fn at_epoch() -> Self {
        Self::new(OffsetDateTime::UNIX_EPOCH)
    }

    /// Advance the clock.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, to: OffsetDateTime) {
        *self.now.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock()
    }
}
