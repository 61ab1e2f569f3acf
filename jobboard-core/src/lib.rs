//! Jobboard Core - Entity Types
//!
//! Pure data structures shared by the cache, the document synthesizer and
//! the HTTP layer. Everything in here is either plain data or a small pure
//! function over plain data.

pub mod config;
pub mod entities;
pub mod error;
pub mod filter;
pub mod identity;

pub use config::{LengthBudget, SiteConfig};
pub use entities::{BoardStats, Job, JobRecord, NewJob};
pub use error::{BoardError, BoardResult, ConfigError, ContentError, StorageError};
pub use filter::{normalize_value, split_list, JobFilters};
pub use identity::{new_job_id, JobId, Timestamp};
