//! Listing filters shared by the store, the cache and the pre-warmer
//!
//! `JobFilters` is the query object behind every listing read. Its in-memory
//! evaluation (`apply`) is the single definition of filter semantics so that
//! a pre-warmed entry and a lazily computed one can never disagree.

use serde::{Deserialize, Serialize};

use crate::entities::JobRecord;

/// Query filters for job listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilters {
    /// Match any of these countries (case-insensitive). Empty = all.
    #[serde(default)]
    pub country: Vec<String>,
    /// Match any of these sectors (case-insensitive). Empty = all.
    #[serde(default)]
    pub sector: Vec<String>,
    /// Free-text search over title, organization, location, country, sector.
    #[serde(default)]
    pub search: Option<String>,
    /// Maximum number of records returned. `0` means no limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl JobFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country.push(country.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector.push(sector.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The trimmed search term, if any non-blank one was given.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Normalized country predicates. Blank entries are not predicates.
    pub fn country_values(&self) -> impl Iterator<Item = String> + '_ {
        self.country.iter().filter_map(|c| normalize_value(c))
    }

    /// Normalized sector predicates. Blank entries are not predicates.
    pub fn sector_values(&self) -> impl Iterator<Item = String> + '_ {
        self.sector.iter().filter_map(|s| normalize_value(s))
    }

    /// True when a country or sector predicate applies.
    pub fn narrows_by_field(&self) -> bool {
        self.country_values().next().is_some() || self.sector_values().next().is_some()
    }

    /// Check a single record against the predicates (ignores `limit`).
    pub fn matches(&self, job: &JobRecord) -> bool {
        if !any_matches(self.country_values(), &job.country) {
            return false;
        }
        if !any_matches(self.sector_values(), &job.sector) {
            return false;
        }
        match self.search_term() {
            Some(term) => {
                let needle = term.to_lowercase();
                [
                    &job.title,
                    &job.organization,
                    &job.location,
                    &job.country,
                    &job.sector,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    /// Evaluate the filters over a snapshot: newest first, then truncated.
    pub fn apply(&self, jobs: &[JobRecord]) -> Vec<JobRecord> {
        let mut matched: Vec<JobRecord> = jobs.iter().filter(|j| self.matches(j)).cloned().collect();
        matched.sort_by(|a, b| {
            b.date_posted
                .cmp(&a.date_posted)
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            matched.truncate(limit);
        }
        matched
    }
}

/// Canonical form of a country or sector value: trimmed and lowercased.
///
/// Blank values normalize to `None`. Both predicate evaluation and cache keys
/// go through this, so they agree on which values count.
pub fn normalize_value(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

fn any_matches(wanted: impl Iterator<Item = String>, value: &str) -> bool {
    let mut wanted = wanted.peekable();
    if wanted.peek().is_none() {
        return true;
    }
    let value = value.trim().to_lowercase();
    wanted.any(|w| w == value)
}

/// Split a comma-separated query parameter into trimmed, non-empty values.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
