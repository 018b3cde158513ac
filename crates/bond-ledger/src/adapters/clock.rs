//! Time source adapters.

use crate::domain::value_objects::Timestamp;
use crate::ports::outbound::TimeSource;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wall-clock time in whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Manually driven clock. Time only moves forward.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: AtomicU64,
}

impl ManualClock {
    /// Clock starting at `initial`.
    #[must_use]
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move forward by `seconds`, saturating at `u64::MAX`. Returns the new time.
    pub fn advance(&self, seconds: u64) -> Timestamp {
        let mut current = self.time.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(seconds);
            match self
                .time
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Jump to `time` if it is not earlier than the current reading.
    /// Returns the time in effect afterwards.
    pub fn set(&self, time: Timestamp) -> Timestamp {
        let previous = self.time.fetch_max(time, Ordering::SeqCst);
        previous.max(time)
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
