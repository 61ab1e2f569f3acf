//! The versioned listing cache.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use jobboard_core::{split_list, BoardResult, BoardStats, JobFilters, JobRecord, Timestamp};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::etag::ETag;
use super::key::CacheKey;
use super::read::{CacheEntry, CacheRead};
use super::stats::CacheStats;
use super::version::{Version, VersionClock};
use crate::JobStore;

/// Payload of a listing entry.
pub type Listing = Vec<JobRecord>;

const DEFAULT_PREWARM_COUNTRIES: &[&str] = &[
    "Kenya",
    "Uganda",
    "Ethiopia",
    "Somalia",
    "South Sudan",
    "Sudan",
    "Nigeria",
    "Democratic Republic of the Congo",
    "Afghanistan",
    "Yemen",
    "Syria",
    "Ukraine",
];

const DEFAULT_PREWARM_SECTORS: &[&str] = &[
    "Health",
    "Education",
    "Protection",
    "Logistics",
    "Nutrition",
    "Water Sanitation Hygiene",
    "Food Security",
    "Coordination",
];

/// Configuration for the listing cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// How long an entry stays servable after insertion.
    pub entry_ttl: Duration,
    /// Bound on listing entries; oldest inserted are evicted first.
    pub max_entries: usize,
    /// Countries warmed individually after a bulk ingest.
    pub prewarm_countries: Vec<String>,
    /// Sectors warmed individually after a bulk ingest.
    pub prewarm_sectors: Vec<String>,
    /// Size of the default first-page slice warmed after a bulk ingest.
    pub default_page_size: usize,
    /// Size of the recent-jobs slice the homepage reads, also warmed.
    pub homepage_page_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_ttl: Duration::from_secs(45),
            max_entries: 100,
            prewarm_countries: DEFAULT_PREWARM_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            prewarm_sectors: DEFAULT_PREWARM_SECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_page_size: 20,
            homepage_page_size: 10,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create CacheConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_CACHE_TTL_SECS`: Entry TTL in seconds (default: 45)
    /// - `BOARD_CACHE_MAX_ENTRIES`: Listing entry bound (default: 100)
    /// - `BOARD_PREWARM_COUNTRIES`: Comma-separated countries to pre-warm
    /// - `BOARD_PREWARM_SECTORS`: Comma-separated sectors to pre-warm
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let entry_ttl = match std::env::var("BOARD_CACHE_TTL_SECS") {
            Ok(raw) => raw.parse().map(Duration::from_secs).unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid BOARD_CACHE_TTL_SECS, using default");
                defaults.entry_ttl
            }),
            Err(_) => defaults.entry_ttl,
        };

        let max_entries = match std::env::var("BOARD_CACHE_MAX_ENTRIES") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid BOARD_CACHE_MAX_ENTRIES, using default");
                defaults.max_entries
            }),
            Err(_) => defaults.max_entries,
        };

        let prewarm_countries = std::env::var("BOARD_PREWARM_COUNTRIES")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.prewarm_countries);

        let prewarm_sectors = std::env::var("BOARD_PREWARM_SECTORS")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.prewarm_sectors);

        Self {
            entry_ttl,
            max_entries,
            prewarm_countries,
            prewarm_sectors,
            ..defaults
        }
    }

    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = ttl;
        self
    }

    /// Set the max number of listing entries.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Replace the pre-warmed countries.
    pub fn with_prewarm_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prewarm_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the pre-warmed sectors.
    pub fn with_prewarm_sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prewarm_sectors = sectors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the homepage's recent-jobs slice size.
    pub fn with_homepage_page_size(mut self, size: usize) -> Self {
        self.homepage_page_size = size;
        self
    }
}

#[derive(Debug, Default)]
pub(super) struct CacheState {
    listings: HashMap<CacheKey, CacheEntry<Listing>>,
    /// Insertion order of `listings`, oldest first.
    order: VecDeque<CacheKey>,
    pub(super) stats: Option<CacheEntry<BoardStats>>,
}

impl CacheState {
    fn remove(&mut self, key: &CacheKey) {
        if self.listings.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    fn clear(&mut self) {
        self.listings.clear();
        self.order.clear();
        self.stats = None;
    }
}

/// Versioned read-through cache for job listings and board statistics.
///
/// Constructed explicitly and shared (usually behind an `Arc`) with whatever
/// serves requests. All state lives behind one mutex; the version clock is
/// only advanced while that mutex is held, so no reader can observe a
/// cleared store under the old version or a populated store under the new
/// one.
#[derive(Debug)]
pub struct JobCache {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    version: VersionClock,
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    invalidations: AtomicU64,
}

impl Default for JobCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl JobCache {
    /// Create a cache on the wall clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache on an explicit time source.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let version = VersionClock::starting_at(clock.now());
        Self {
            config,
            clock,
            version,
            state: Mutex::new(CacheState::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Current data version.
    pub fn version(&self) -> Version {
        self.version.current()
    }

    /// Advance the version and drop every entry, atomically.
    ///
    /// Every mutation path of the job collection must call this before the
    /// mutation is reported complete.
    pub fn invalidate(&self) -> Version {
        let mut state = self.lock();
        let dropped = state.listings.len();
        let version = self.version.advance(self.clock.now());
        state.clear();
        drop(state);

        self.invalidations.fetch_add(1, Ordering::Relaxed);
        info!(%version, dropped, "Cache invalidated");
        version
    }

    /// Look up a fresh listing entry. Expired entries are removed.
    pub fn get(&self, filters: &JobFilters) -> Option<CacheEntry<Listing>> {
        let key = CacheKey::from_filters(filters);
        let now = self.clock.now();
        let mut state = self.lock();

        let fresh = match state.listings.get(&key) {
            Some(entry) if entry.is_fresh_at(now, self.config.entry_ttl) => Some(entry.clone()),
            Some(_) => {
                state.remove(&key);
                self.expirations.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache entry expired");
                None
            }
            None => None,
        };
        drop(state);

        self.record_lookup(&key, fresh.is_some());
        fresh
    }

    /// Store a listing under the current version.
    pub fn set(&self, filters: &JobFilters, data: Listing) -> CacheEntry<Listing> {
        let key = CacheKey::from_filters(filters);
        let mut state = self.lock();
        let version = self.version.current();
        self.insert_listing(&mut state, key, data, version)
    }

    /// Look up the statistics slot.
    pub fn get_stats(&self) -> Option<CacheEntry<BoardStats>> {
        let now = self.clock.now();
        let mut state = self.lock();

        let fresh = match &state.stats {
            Some(entry) if entry.is_fresh_at(now, self.config.entry_ttl) => Some(entry.clone()),
            Some(_) => {
                state.stats = None;
                self.expirations.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => None,
        };
        drop(state);

        self.record_lookup(&CacheKey::stats(), fresh.is_some());
        fresh
    }

    /// Overwrite the statistics slot under the current version.
    pub fn set_stats(&self, stats: BoardStats) -> CacheEntry<BoardStats> {
        let mut state = self.lock();
        let version = self.version.current();
        let entry = self.stats_entry(stats, version);
        state.stats = Some(entry.clone());
        entry
    }

    /// ETag a listing would carry at the current version.
    ///
    /// Needs no cache population, so conditional GETs can be answered
    /// without touching storage.
    pub fn generate_etag(&self, filters: &JobFilters) -> ETag {
        ETag::derive(self.version(), &CacheKey::from_filters(filters))
    }

    /// ETag the statistics slot would carry at the current version.
    pub fn stats_etag(&self) -> ETag {
        ETag::derive(self.version(), &CacheKey::stats())
    }

    /// Serve a listing from cache, computing and storing it on a miss.
    ///
    /// Storage errors propagate unchanged and nothing is cached for them.
    /// If the version moves while the computation is in flight, the result
    /// is returned under the version it was computed from but not stored.
    pub async fn get_or_compute<S>(
        &self,
        filters: &JobFilters,
        store: &S,
    ) -> BoardResult<CacheRead<Listing>>
    where
        S: JobStore + ?Sized,
    {
        if let Some(entry) = self.get(filters) {
            return Ok(CacheRead::from_cache(entry));
        }

        let observed = self.version();
        let data = compute_listing(filters, store).await?;
        let key = CacheKey::from_filters(filters);

        let mut state = self.lock();
        let entry = if self.version.current() == observed {
            self.insert_listing(&mut state, key, data, observed)
        } else {
            drop(state);
            debug!(key = %key, "Version moved during computation, not caching");
            CacheEntry::new(
                Arc::new(data),
                self.clock.now(),
                ETag::derive(observed, &key),
                observed,
            )
        };
        Ok(CacheRead::from_storage(entry))
    }

    /// Serve board statistics from cache, recounting the collection on a miss.
    pub async fn stats_or_compute<S>(&self, store: &S) -> BoardResult<CacheRead<BoardStats>>
    where
        S: JobStore + ?Sized,
    {
        if let Some(entry) = self.get_stats() {
            return Ok(CacheRead::from_cache(entry));
        }

        let observed = self.version();
        let jobs = store.list_all_jobs().await?;
        let stats = BoardStats::from_jobs(&jobs, self.clock.now());

        let mut state = self.lock();
        let entry = self.stats_entry(stats, observed);
        if self.version.current() == observed {
            state.stats = Some(entry.clone());
        }
        Ok(CacheRead::from_storage(entry))
    }

    /// Current usage counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            entry_count: state.listings.len(),
            stats_cached: state.stats.is_some(),
            version: Some(self.version.current()),
        }
    }

    /// Number of listing entries held, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Every critical section leaves the state consistent, so a panic
        // elsewhere never invalidates it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_lookup(&self, key: &CacheKey, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache miss");
        }
    }

    pub(super) fn insert_listing(
        &self,
        state: &mut CacheState,
        key: CacheKey,
        data: Listing,
        version: Version,
    ) -> CacheEntry<Listing> {
        let entry = CacheEntry::new(
            Arc::new(data),
            self.clock.now(),
            ETag::derive(version, &key),
            version,
        );

        if state.listings.insert(key.clone(), entry.clone()).is_some() {
            state.order.retain(|k| k != &key);
        }
        state.order.push_back(key);

        let bound = self.config.max_entries.max(1);
        while state.listings.len() > bound {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };
            state.listings.remove(&oldest);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            debug!(key = %oldest, "Cache entry evicted");
        }

        entry
    }

    pub(super) fn stats_entry(&self, stats: BoardStats, version: Version) -> CacheEntry<BoardStats> {
        CacheEntry::new(
            Arc::new(stats),
            self.clock.now(),
            ETag::derive(version, &CacheKey::stats()),
            version,
        )
    }
}

/// Compute a listing through the store.
///
/// A pure text query goes through `search_jobs`; anything with a country or
/// sector goes through `filter_jobs`. Both end in the same ordering and limit.
async fn compute_listing<S>(filters: &JobFilters, store: &S) -> BoardResult<Listing>
where
    S: JobStore + ?Sized,
{
    match filters.search_term() {
        Some(term) if !filters.narrows_by_field() => {
            let found = store.search_jobs(term).await?;
            Ok(filters.apply(&found))
        }
        _ => store.filter_jobs(filters).await,
    }
}
