//! Cache pre-warming after a bulk ingest.

use jobboard_core::{BoardStats, JobFilters, JobRecord};
use tracing::{debug, info};

use super::key::CacheKey;
use super::store::{CacheConfig, JobCache, Listing};
use super::version::Version;

/// The fixed set of queries warmed after a bulk ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct PrewarmPlan {
    queries: Vec<JobFilters>,
}

impl PrewarmPlan {
    /// Unfiltered, each configured country, each configured sector, the
    /// default first page and the homepage's recent slice.
    pub fn from_config(config: &CacheConfig) -> Self {
        let mut queries = Vec::with_capacity(
            3 + config.prewarm_countries.len() + config.prewarm_sectors.len(),
        );
        queries.push(JobFilters::new());
        queries.extend(
            config
                .prewarm_countries
                .iter()
                .map(|country| JobFilters::new().with_country(country.clone())),
        );
        queries.extend(
            config
                .prewarm_sectors
                .iter()
                .map(|sector| JobFilters::new().with_sector(sector.clone())),
        );
        for size in [config.default_page_size, config.homepage_page_size] {
            let page = JobFilters::new().with_limit(size);
            if size > 0 && !queries.contains(&page) {
                queries.push(page);
            }
        }
        Self { queries }
    }

    pub fn queries(&self) -> &[JobFilters] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl JobCache {
    /// Populate the common queries and the stats slot from a full snapshot.
    ///
    /// `observed` is the version read before `all_jobs` was fetched. If any
    /// invalidation has landed since, the snapshot may predate it and nothing
    /// is written. Otherwise every entry is stored under `observed` in one
    /// critical section. Never touches the version. Returns the number of
    /// listing entries written.
    pub fn prewarm(&self, all_jobs: &[JobRecord], observed: Version) -> usize {
        let plan = PrewarmPlan::from_config(self.config());
        let listings: Vec<(CacheKey, Listing)> = plan
            .queries()
            .iter()
            .map(|filters| (CacheKey::from_filters(filters), filters.apply(all_jobs)))
            .collect();
        let stats = self.stats_entry(BoardStats::from_jobs(all_jobs, self.now()), observed);

        let mut state = self.lock();
        if self.version() != observed {
            drop(state);
            debug!(
                %observed,
                current = %self.version(),
                "Version moved since snapshot, skipping pre-warm"
            );
            return 0;
        }
        for (key, data) in listings {
            self.insert_listing(&mut state, key, data, observed);
        }
        state.stats = Some(stats);
        drop(state);

        info!(
            entries = plan.len(),
            jobs = all_jobs.len(),
            version = %observed,
            "Cache pre-warmed"
        );
        plan.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobboard_core::new_job_id;

    fn record(country: &str, sector: &str) -> JobRecord {
        JobRecord {
            id: new_job_id(),
            title: "Programme Officer".to_string(),
            organization: "WFP".to_string(),
            location: "Field".to_string(),
            country: country.to_string(),
            sector: sector.to_string(),
            date_posted: Utc::now(),
            deadline: None,
        }
    }

    #[test]
    fn test_plan_shape() {
        let config = CacheConfig::default()
            .with_prewarm_countries(["Kenya", "Uganda"])
            .with_prewarm_sectors(["Health"])
            .with_default_page_size(20);
        let plan = PrewarmPlan::from_config(&config);

        assert_eq!(plan.len(), 6);
        assert_eq!(plan.queries()[0], JobFilters::new());
        assert_eq!(plan.queries()[4], JobFilters::new().with_limit(20));
        assert_eq!(plan.queries()[5], JobFilters::new().with_limit(10));
    }

    #[test]
    fn test_plan_deduplicates_equal_page_sizes() {
        let config = CacheConfig::default()
            .with_prewarm_countries(Vec::<String>::new())
            .with_prewarm_sectors(Vec::<String>::new())
            .with_default_page_size(10)
            .with_homepage_page_size(10);
        let plan = PrewarmPlan::from_config(&config);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_prewarm_turns_first_reads_into_hits() {
        let cache = JobCache::new(
            CacheConfig::default()
                .with_prewarm_countries(["Kenya"])
                .with_prewarm_sectors(["Health"]),
        );
        let jobs = vec![
            record("Kenya", "Health"),
            record("Kenya", "Education"),
            record("Uganda", "Health"),
        ];
        let version = cache.version();

        let written = cache.prewarm(&jobs, version);
        assert_eq!(written, 5);
        assert_eq!(cache.version(), version);

        let kenya = cache
            .get(&JobFilters::new().with_country("kenya"))
            .expect("country should be warm");
        assert_eq!(kenya.data().len(), 2);

        let health = cache
            .get(&JobFilters::new().with_sector("Health"))
            .expect("sector should be warm");
        assert_eq!(health.data().len(), 2);

        let stats = cache.get_stats().expect("stats should be warm");
        assert_eq!(stats.data().total_jobs, 3);
    }

    #[test]
    fn test_prewarm_respects_bound() {
        let cache = JobCache::new(CacheConfig::default().with_max_entries(5));
        cache.prewarm(&[record("Kenya", "Health")], cache.version());
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_prewarm_skipped_when_version_moved() {
        let cache = JobCache::new(CacheConfig::default());
        let observed = cache.version();
        let snapshot = vec![record("Kenya", "Health"), record("Kenya", "Education")];

        // A mutation lands between taking the snapshot and warming from it.
        cache.invalidate();

        assert_eq!(cache.prewarm(&snapshot, observed), 0);
        assert!(cache.is_empty());
        assert!(cache.get_stats().is_none());
        assert!(cache.get(&JobFilters::new()).is_none());
    }

    #[test]
    fn test_prewarmed_entries_carry_observed_version() {
        let cache = JobCache::new(CacheConfig::default());
        let observed = cache.invalidate();
        cache.prewarm(&[record("Kenya", "Health")], observed);

        let entry = cache.get(&JobFilters::new()).expect("unfiltered listing should be warm");
        assert_eq!(entry.version(), observed);
        assert_eq!(*entry.etag(), cache.generate_etag(&JobFilters::new()));
    }
}
