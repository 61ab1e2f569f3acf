//! Jobboard Storage - Store Trait, In-Memory Store and Listing Cache
//!
//! Defines the storage collaborator the cache reads through, an in-memory
//! implementation used by the server and tests, and the versioned listing
//! cache itself (see [`cache`]).

pub mod cache;
pub mod memory;

pub use cache::{
    CacheConfig, CacheEntry, CacheKey, CacheRead, CacheStats, Clock, ETag, JobCache, Listing,
    ManualClock, PrewarmPlan, SystemClock, Version, VersionClock,
};
pub use memory::InMemoryJobStore;

use async_trait::async_trait;
use jobboard_core::{BoardResult, Job, JobFilters, JobId, JobRecord, NewJob, Timestamp};

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for jobs. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub description: Option<String>,
    pub qualifications: Option<String>,
    pub how_to_apply: Option<String>,
    pub source_url: Option<String>,
    pub deadline: Option<Timestamp>,
}

impl JobUpdate {
    /// Apply the non-empty fields of this update to a job.
    pub fn apply_to(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(organization) = self.organization {
            job.organization = organization;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(country) = self.country {
            job.country = country;
        }
        if let Some(sector) = self.sector {
            job.sector = sector;
        }
        if let Some(description) = self.description {
            job.description = Some(description);
        }
        if let Some(qualifications) = self.qualifications {
            job.qualifications = Some(qualifications);
        }
        if let Some(how_to_apply) = self.how_to_apply {
            job.how_to_apply = Some(how_to_apply);
        }
        if let Some(source_url) = self.source_url {
            job.source_url = Some(source_url);
        }
        if let Some(deadline) = self.deadline {
            job.deadline = Some(deadline);
        }
    }
}

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Storage collaborator for job postings.
///
/// The listing cache only reads through the query half of this trait. The
/// mutation half never touches the cache: callers that mutate must invalidate
/// the cache themselves as part of the same logical operation.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Full snapshot of the collection as listing records.
    async fn list_all_jobs(&self) -> BoardResult<Vec<JobRecord>>;

    /// Records matching the filters, newest first, limit applied.
    async fn filter_jobs(&self, filters: &JobFilters) -> BoardResult<Vec<JobRecord>>;

    /// Records whose text fields contain `text` (case-insensitive).
    async fn search_jobs(&self, text: &str) -> BoardResult<Vec<JobRecord>>;

    /// A single full job.
    async fn get_job(&self, id: JobId) -> BoardResult<Option<Job>>;

    async fn create_job(&self, job: NewJob) -> BoardResult<Job>;

    async fn update_job(&self, id: JobId, update: JobUpdate) -> BoardResult<Job>;

    async fn delete_job(&self, id: JobId) -> BoardResult<()>;

    /// Insert or replace a batch of jobs, returning how many were written.
    async fn upsert_jobs(&self, jobs: Vec<Job>) -> BoardResult<usize>;
}
