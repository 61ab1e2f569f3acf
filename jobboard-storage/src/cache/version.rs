//! Version clock for cache invalidation.
//!
//! The version is the "data generation" of the job collection: epoch
//! milliseconds of the last mutation. It only ever moves forward, and it
//! moves strictly forward on every bump even when two mutations land in the
//! same millisecond.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use jobboard_core::Timestamp;
use serde::Serialize;

/// A point in the mutation history of the job collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version(i64);

impl Version {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Check if this version is newer than another.
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic version counter.
#[derive(Debug)]
pub struct VersionClock {
    current: AtomicI64,
}

impl VersionClock {
    /// Start the clock at the given instant (process start).
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            current: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Current version.
    pub fn current(&self) -> Version {
        Version(self.current.load(Ordering::SeqCst))
    }

    /// Advance to `now`, or one past the current value if `now` is not ahead.
    pub fn advance(&self, now: Timestamp) -> Version {
        let now_ms = now.timestamp_millis();
        let previous = self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now_ms.max(prev.saturating_add(1)))
            })
            .unwrap_or_else(|prev| prev);
        Version(now_ms.max(previous.saturating_add(1)))
    }
}
