//! Cache entries and read results.
//!
//! [`CacheEntry`] is what the store holds; [`CacheRead`] is what callers get
//! back from a read-through lookup, carrying whether it was a hit.

use std::sync::Arc;
use std::time::Duration;

use jobboard_core::Timestamp;

use super::etag::ETag;
use super::version::Version;

/// A cached value with its insertion time and validator.
///
/// The payload is shared behind an `Arc`, so handing an entry to a caller
/// never copies the result set.
#[derive(Debug)]
pub struct CacheEntry<T> {
    data: Arc<T>,
    cached_at: Timestamp,
    etag: ETag,
    version: Version,
}

impl<T> CacheEntry<T> {
    pub fn new(data: Arc<T>, cached_at: Timestamp, etag: ETag, version: Version) -> Self {
        Self {
            data,
            cached_at,
            etag,
            version,
        }
    }

    pub fn data(&self) -> &Arc<T> {
        &self.data
    }

    pub fn cached_at(&self) -> Timestamp {
        self.cached_at
    }

    pub fn etag(&self) -> &ETag {
        &self.etag
    }

    /// Version the entry was stored under.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Age of the entry at `now` (zero if `now` precedes insertion).
    pub fn age_at(&self, now: Timestamp) -> Duration {
        now.signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Whether the entry is still within `ttl` at `now` (inclusive bound).
    pub fn is_fresh_at(&self, now: Timestamp, ttl: Duration) -> bool {
        self.age_at(now) <= ttl
    }
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            cached_at: self.cached_at,
            etag: self.etag.clone(),
            version: self.version,
        }
    }
}

/// Result of a read-through lookup.
#[derive(Debug, Clone)]
pub struct CacheRead<T> {
    value: Arc<T>,
    etag: ETag,
    cached_at: Timestamp,
    was_cache_hit: bool,
}

impl<T> CacheRead<T> {
    /// Wrap an entry that was served from the cache.
    pub fn from_cache(entry: CacheEntry<T>) -> Self {
        Self {
            value: entry.data,
            etag: entry.etag,
            cached_at: entry.cached_at,
            was_cache_hit: true,
        }
    }

    /// Wrap an entry that was just computed from storage.
    pub fn from_storage(entry: CacheEntry<T>) -> Self {
        Self {
            was_cache_hit: false,
            ..Self::from_cache(entry)
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper and return the shared payload.
    pub fn into_value(self) -> Arc<T> {
        self.value
    }

    pub fn etag(&self) -> &ETag {
        &self.etag
    }

    pub fn cached_at(&self) -> Timestamp {
        self.cached_at
    }

    pub fn was_cache_hit(&self) -> bool {
        self.was_cache_hit
    }

    pub fn was_cache_miss(&self) -> bool {
        !self.was_cache_hit
    }
}
