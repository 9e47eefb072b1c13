//! Arrival timestamps

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock microsecond stamps, strictly increasing per clock
///
/// A wall clock that steps backwards or two frames landing in the same
/// microsecond still yield distinct, ordered stamps.
#[derive(Debug, Default)]
pub struct ArrivalClock {
    last_us: AtomicU64,
}

impl ArrivalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Microseconds since the UNIX epoch, 0 if the system clock predates it
    pub fn wall_us() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }

    /// Next arrival stamp: `max(wall, previous + 1)`
    pub fn stamp(&self) -> u64 {
        let wall = Self::wall_us();
        let previous = self
            .last_us
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(wall.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        wall.max(previous + 1)
    }

    /// Last stamp handed out, 0 before the first
    pub fn last(&self) -> u64 {
        self.last_us.load(Ordering::Acquire)
    }
}
