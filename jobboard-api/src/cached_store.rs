//! Cached Job Store
//!
//! `CachedJobStore` pairs the storage collaborator with the listing cache.
//! Reads go through the cache; every successful mutation invalidates it
//! before returning, so a response to a write is never followed by a stale
//! listing read.

use std::sync::Arc;

use jobboard_core::{BoardResult, BoardStats, Job, JobFilters, JobId, JobRecord, NewJob};
use jobboard_storage::{CacheRead, ETag, JobCache, JobStore, JobUpdate, Listing};
use tracing::info;

/// Storage plus cache, shared by every route.
#[derive(Clone)]
pub struct CachedJobStore {
    store: Arc<dyn JobStore>,
    cache: Arc<JobCache>,
}

impl std::fmt::Debug for CachedJobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedJobStore")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CachedJobStore {
    pub fn new(store: Arc<dyn JobStore>, cache: Arc<JobCache>) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &Arc<JobCache> {
        &self.cache
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Listing for `filters`, served from cache when fresh.
    pub async fn listing(&self, filters: &JobFilters) -> BoardResult<CacheRead<Listing>> {
        self.cache.get_or_compute(filters, self.store.as_ref()).await
    }

    /// ETag the listing for `filters` carries right now.
    pub fn listing_etag(&self, filters: &JobFilters) -> ETag {
        self.cache.generate_etag(filters)
    }

    /// Board statistics, served from cache when fresh.
    pub async fn stats(&self) -> BoardResult<CacheRead<BoardStats>> {
        self.cache.stats_or_compute(self.store.as_ref()).await
    }

    pub fn stats_etag(&self) -> ETag {
        self.cache.stats_etag()
    }

    /// The `limit` most recently posted jobs.
    pub async fn recent(&self, limit: usize) -> BoardResult<Arc<Listing>> {
        let filters = JobFilters::new().with_limit(limit);
        Ok(self.listing(&filters).await?.into_value())
    }

    /// A single job. Detail reads are not cached.
    pub async fn get_job(&self, id: JobId) -> BoardResult<Option<Job>> {
        self.store.get_job(id).await
    }

    /// Every job in the collection, uncached.
    pub async fn all_records(&self) -> BoardResult<Vec<JobRecord>> {
        self.store.list_all_jobs().await
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub async fn create_job(&self, job: NewJob) -> BoardResult<Job> {
        let job = self.store.create_job(job).await?;
        self.cache.invalidate();
        Ok(job)
    }

    pub async fn update_job(&self, id: JobId, update: JobUpdate) -> BoardResult<Job> {
        let job = self.store.update_job(id, update).await?;
        self.cache.invalidate();
        Ok(job)
    }

    pub async fn delete_job(&self, id: JobId) -> BoardResult<()> {
        self.store.delete_job(id).await?;
        self.cache.invalidate();
        Ok(())
    }

    /// Upsert a batch, invalidate once and pre-warm from the full collection.
    ///
    /// Pre-warming is skipped if another mutation lands while the snapshot
    /// is being read. Returns the number of jobs written.
    pub async fn bulk_ingest(&self, jobs: Vec<Job>) -> BoardResult<usize> {
        let written = self.store.upsert_jobs(jobs).await?;
        let observed = self.cache.invalidate();
        let all = self.store.list_all_jobs().await?;
        let warmed = self.cache.prewarm(&all, observed);
        info!(written, warmed, total = all.len(), "Bulk ingest complete");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_storage::{CacheConfig, InMemoryJobStore};
    use jobboard_test_utils::{new_job_fixture, sample_board};

    fn cached(jobs: Vec<Job>) -> CachedJobStore {
        CachedJobStore::new(
            Arc::new(InMemoryJobStore::with_jobs(jobs)),
            Arc::new(JobCache::new(CacheConfig::default())),
        )
    }

    #[tokio::test]
    async fn test_mutations_invalidate() -> BoardResult<()> {
        let store = cached(sample_board());
        let filters = JobFilters::new().with_country("Kenya");

        let first = store.listing(&filters).await?;
        assert!(first.was_cache_miss());
        let created = store.create_job(new_job_fixture("Kenya", "Health")).await?;

        let second = store.listing(&filters).await?;
        assert!(second.was_cache_miss());
        assert_ne!(first.etag(), second.etag());
        assert_eq!(second.value().len(), 6);

        let before = store.listing_etag(&filters);
        store.delete_job(created.id).await?;
        assert_ne!(store.listing_etag(&filters), before);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() -> BoardResult<()> {
        let store = cached(sample_board());
        let version = store.cache().version();
        assert!(store.delete_job(uuid::Uuid::now_v7()).await.is_err());
        assert_eq!(store.cache().version(), version);
        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_ingest_prewarms() -> BoardResult<()> {
        let store = cached(Vec::new());
        let written = store.bulk_ingest(sample_board()).await?;
        assert_eq!(written, 7);

        let kenya = store.listing(&JobFilters::new().with_country("Kenya")).await?;
        assert!(kenya.was_cache_hit());
        assert_eq!(kenya.value().len(), 5);

        let stats = store.stats().await?;
        assert!(stats.was_cache_hit());
        assert_eq!(stats.value().total_jobs, 7);

        let homepage_slice = store.cache().config().homepage_page_size;
        assert!(store
            .cache()
            .get(&JobFilters::new().with_limit(homepage_slice))
            .is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() -> BoardResult<()> {
        let store = cached(sample_board());
        let recent = store.recent(3).await?;
        assert_eq!(recent.len(), 3);
        assert!(recent.windows(2).all(|w| w[0].date_posted >= w[1].date_posted));
        Ok(())
    }
}
