//! Versioned read-through cache for job listings and board statistics.
//!
//! # Design
//!
//! Every mutation of the job collection advances a single [`VersionClock`]
//! and clears the store in one critical section. ETags are a pure function
//! of `(version, normalized query)`, so advancing the clock implicitly
//! retires every ETag handed out before it without touching any key.
//!
//! Entries also expire lazily after a fixed TTL and the store is bounded;
//! when it overflows, the oldest inserted entries go first.
//!
//! # Example
//!
//! ```ignore
//! let cache = JobCache::new(CacheConfig::default());
//!
//! // Listing endpoint
//! let read = cache.get_or_compute(&filters, &store).await?;
//! respond_with(read.etag(), read.value());
//!
//! // Any create/update/delete path
//! store.delete_job(id).await?;
//! cache.invalidate();
//! ```

pub mod clock;
pub mod etag;
pub mod key;
pub mod prewarm;
pub mod read;
pub mod stats;
pub mod store;
pub mod version;

pub use clock::{Clock, ManualClock, SystemClock};
pub use etag::ETag;
pub use key::CacheKey;
pub use prewarm::PrewarmPlan;
pub use read::{CacheEntry, CacheRead};
pub use store::{CacheConfig, JobCache, Listing};
pub use stats::CacheStats;
pub use version::{Version, VersionClock};
