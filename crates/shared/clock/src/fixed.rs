use chrono::{Duration, TimeZone, Utc};
use parking_lot::RwLock;
use tcm_core::Timestamp;
use tcm_ports::Clock;

/// Clock frozen at a chosen instant; only moves when told to
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Frozen at midnight UTC of the given date
    ///
    /// Returns `None` for an impossible calendar date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(Self::new)
    }

    /// Jump forward (or backward, for negative durations)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now += by;
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.write() = to;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
