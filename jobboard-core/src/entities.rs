//! Job entities and aggregate statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::identity::{new_job_id, JobId, Timestamp};

/// Lightweight view of a job used for listings and caching.
///
/// The cache only ever holds read-only snapshots of these records; the
/// storage collaborator owns the canonical data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub country: String,
    pub sector: String,
    pub date_posted: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
}

/// Full job posting as rendered on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub country: String,
    pub sector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_apply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub date_posted: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
}

impl Job {
    /// Project this job onto its listing view.
    pub fn record(&self) -> JobRecord {
        JobRecord {
            id: self.id,
            title: self.title.clone(),
            organization: self.organization.clone(),
            location: self.location.clone(),
            country: self.country.clone(),
            sector: self.sector.clone(),
            date_posted: self.date_posted,
            deadline: self.deadline,
        }
    }
}

/// Payload for creating a job (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub organization: String,
    #[serde(default)]
    pub location: String,
    pub country: String,
    pub sector: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub how_to_apply: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    pub date_posted: Timestamp,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
}

impl NewJob {
    /// Materialize the job with a freshly generated id.
    pub fn into_job(self) -> Job {
        self.into_job_with_id(new_job_id())
    }

    /// Materialize the job with a caller-chosen id (used by bulk ingest).
    pub fn into_job_with_id(self, id: JobId) -> Job {
        Job {
            id,
            title: self.title,
            organization: self.organization,
            location: self.location,
            country: self.country,
            sector: self.sector,
            description: self.description,
            qualifications: self.qualifications,
            how_to_apply: self.how_to_apply,
            source_url: self.source_url,
            date_posted: self.date_posted,
            deadline: self.deadline,
        }
    }
}

/// Aggregate counters shown on the homepage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total_jobs: usize,
    pub organizations: usize,
    pub new_today: usize,
}

impl BoardStats {
    /// Recount statistics from a full snapshot of the collection.
    ///
    /// Organizations are counted case-insensitively; "new today" means posted
    /// on the same UTC calendar date as `now`.
    pub fn from_jobs(jobs: &[JobRecord], now: Timestamp) -> Self {
        let today = now.date_naive();
        let organizations: HashSet<String> = jobs
            .iter()
            .map(|job| job.organization.trim().to_lowercase())
            .filter(|org| !org.is_empty())
            .collect();

        Self {
            total_jobs: jobs.len(),
            organizations: organizations.len(),
            new_today: jobs
                .iter()
                .filter(|job| job.date_posted.date_naive() == today)
                .count(),
        }
    }
}
