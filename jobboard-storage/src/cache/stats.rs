//! Cache usage counters.

use serde::Serialize;

use super::version::Version;

/// Snapshot of cache usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry.
    pub hits: u64,
    /// Lookups that found nothing usable.
    pub misses: u64,
    /// Entries dropped because the store exceeded its bound.
    pub evictions: u64,
    /// Entries dropped on read because their TTL had passed.
    pub expirations: u64,
    /// Number of invalidations since start.
    pub invalidations: u64,
    /// Listing entries currently held.
    pub entry_count: usize,
    /// Whether the statistics slot is populated.
    pub stats_cached: bool,
    /// Current data version.
    pub version: Option<Version>,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
