//! Job identifiers and timestamps

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier of a job posting. UUIDv7, so ids sort by creation time.
pub type JobId = Uuid;

/// All board timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Mint an id for a newly created job.
pub fn new_job_id() -> JobId {
    Uuid::now_v7()
}
