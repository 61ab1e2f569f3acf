//! In-memory job store.
//!
//! Stands in for the relational store in tests and single-node deployments.
//! Knows nothing about caching.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use jobboard_core::{
    BoardError, BoardResult, Job, JobFilters, JobId, JobRecord, NewJob, StorageError,
};

use crate::{JobStore, JobUpdate};

/// In-memory job store backed by a `RwLock<HashMap>`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with jobs.
    pub fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let map = jobs.into_iter().map(|job| (job.id, job)).collect();
        Self {
            jobs: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored jobs.
    pub fn len(&self) -> BoardResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> BoardResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> BoardResult<std::sync::RwLockReadGuard<'_, HashMap<JobId, Job>>> {
        self.jobs
            .read()
            .map_err(|_| BoardError::Storage(StorageError::LockPoisoned))
    }

    fn write(&self) -> BoardResult<std::sync::RwLockWriteGuard<'_, HashMap<JobId, Job>>> {
        self.jobs
            .write()
            .map_err(|_| BoardError::Storage(StorageError::LockPoisoned))
    }

    fn records(&self) -> BoardResult<Vec<JobRecord>> {
        Ok(self.read()?.values().map(Job::record).collect())
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list_all_jobs(&self) -> BoardResult<Vec<JobRecord>> {
        self.records()
    }

    async fn filter_jobs(&self, filters: &JobFilters) -> BoardResult<Vec<JobRecord>> {
        Ok(filters.apply(&self.records()?))
    }

    async fn search_jobs(&self, text: &str) -> BoardResult<Vec<JobRecord>> {
        let filters = JobFilters::new().with_search(text);
        Ok(filters.apply(&self.records()?))
    }

    async fn get_job(&self, id: JobId) -> BoardResult<Option<Job>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn create_job(&self, job: NewJob) -> BoardResult<Job> {
        let job = job.into_job();
        let mut jobs = self.write()?;
        if jobs.contains_key(&job.id) {
            return Err(BoardError::Storage(StorageError::InsertFailed {
                reason: format!("job {} already exists", job.id),
            }));
        }
        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: JobId, update: JobUpdate) -> BoardResult<Job> {
        let mut jobs = self.write()?;
        let job = jobs
            .get_mut(&id)
            .ok_or(BoardError::Storage(StorageError::NotFound { id }))?;
        update.apply_to(job);
        Ok(job.clone())
    }

    async fn delete_job(&self, id: JobId) -> BoardResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(BoardError::Storage(StorageError::NotFound { id }))
    }

    async fn upsert_jobs(&self, batch: Vec<Job>) -> BoardResult<usize> {
        let mut jobs = self.write()?;
        let written = batch.len();
        for job in batch {
            jobs.insert(job.id, job);
        }
        Ok(written)
    }
}
