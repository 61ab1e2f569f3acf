//! Canonical cache keys for listing queries.
//!
//! `CacheKey` has a private inner string, so the only ways to obtain one are
//! [`CacheKey::from_filters`] and [`CacheKey::stats`]. Two filter objects that
//! differ only in value order (or letter case, which the filters ignore)
//! therefore always land on the same key.

use std::fmt;

use jobboard_core::{normalize_value, JobFilters};

/// Prefix for listing keys. Keeps them disjoint from the stats slot.
const LISTING_PREFIX: &str = "jobs";

/// Key of the single statistics slot.
const STATS_KEY: &str = "stats";

/// A normalized listing query signature.
///
/// # Format
///
/// `jobs|country=<c1,c2>|sector=<s1>|search=<term>|limit=<n>`
///
/// - value lists go through [`normalize_value`] (blank entries dropped) and
///   are sorted, duplicates kept
/// - a missing search is the empty string, a missing limit is `0`
/// - `%`, `,` and `|` inside values are percent-escaped
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    inner: String,
}

impl CacheKey {
    /// Build the canonical key for a listing query.
    pub fn from_filters(filters: &JobFilters) -> Self {
        let country = normalize_list(&filters.country);
        let sector = normalize_list(&filters.sector);
        let search = filters
            .search_term()
            .map(|term| escape(&term.to_lowercase()))
            .unwrap_or_default();
        let limit = filters.limit.unwrap_or(0);

        Self {
            inner: format!(
                "{LISTING_PREFIX}|country={country}|sector={sector}|search={search}|limit={limit}"
            ),
        }
    }

    /// Key of the aggregate statistics slot.
    pub fn stats() -> Self {
        Self {
            inner: STATS_KEY.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_stats(&self) -> bool {
        self.inner == STATS_KEY
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

fn normalize_list(values: &[String]) -> String {
    let mut normalized: Vec<String> = values
        .iter()
        .filter_map(|v| normalize_value(v))
        .map(|v| escape(&v))
        .collect();
    normalized.sort();
    normalized.join(",")
}

fn escape(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace(',', "%2C")
        .replace('|', "%7C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_independent() {
        let a = JobFilters::new().with_country("Kenya").with_country("Uganda");
        let b = JobFilters::new().with_country("Uganda").with_country("Kenya");
        assert_eq!(CacheKey::from_filters(&a), CacheKey::from_filters(&b));
    }

    #[test]
    fn test_missing_fields_normalized() {
        let key = CacheKey::from_filters(&JobFilters::new());
        assert_eq!(key.as_str(), "jobs|country=|sector=|search=|limit=0");

        let blank_search = JobFilters::new().with_search("  ");
        assert_eq!(CacheKey::from_filters(&blank_search), key);
    }

    #[test]
    fn test_multiset_semantics() {
        let once = JobFilters::new().with_sector("Health");
        let twice = JobFilters::new().with_sector("Health").with_sector("Health");
        assert_ne!(CacheKey::from_filters(&once), CacheKey::from_filters(&twice));
    }

    #[test]
    fn test_fields_do_not_bleed() {
        let a = JobFilters::new().with_country("a,b");
        let b = JobFilters::new().with_country("a").with_country("b");
        assert_ne!(CacheKey::from_filters(&a), CacheKey::from_filters(&b));

        let c = JobFilters::new().with_search("x|sector=y");
        let d = JobFilters::new().with_search("x").with_sector("y");
        assert_ne!(CacheKey::from_filters(&c), CacheKey::from_filters(&d));
    }

    #[test]
    fn test_limit_distinguishes_keys() {
        let a = JobFilters::new().with_limit(20);
        let b = JobFilters::new();
        assert_ne!(CacheKey::from_filters(&a), CacheKey::from_filters(&b));
    }

    #[test]
    fn test_stats_key_is_disjoint() {
        let stats = CacheKey::stats();
        assert!(stats.is_stats());
        assert!(!CacheKey::from_filters(&JobFilters::new()).is_stats());
    }
}
