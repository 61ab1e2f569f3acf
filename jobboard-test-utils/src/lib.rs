//! Job Board Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for jobs and filters
//! - Fixtures for common board states
//! - Assertions for board-specific error shapes

// Re-export core types for convenience
pub use jobboard_core::{
    BoardError, BoardResult, BoardStats, ContentError, Job, JobFilters, JobId, JobRecord, NewJob,
    SiteConfig, StorageError, Timestamp,
};

pub use fixtures::{job_fixture, new_job_fixture, rich_job, sample_board, thin_job};
pub use generators::{arb_filters, arb_job, arb_job_record};

use chrono::{Duration, Utc};
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for job board types.

    use super::*;
    use proptest::prelude::*;

    const COUNTRIES: &[&str] = &["Kenya", "Uganda", "Somalia", "Yemen", "Atlantis", ""];
    const SECTORS: &[&str] = &["Health", "Education", "Logistics", "Protection", "Basket Weaving"];

    /// Generate a timestamp between 2020 and 2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    pub fn arb_country() -> impl Strategy<Value = String> {
        prop::sample::select(COUNTRIES).prop_map(str::to_string)
    }

    pub fn arb_sector() -> impl Strategy<Value = String> {
        prop::sample::select(SECTORS).prop_map(str::to_string)
    }

    const WORDS: &[&str] = &[
        "field", "programme", "support", "community", "health", "R&D", "<b>bold</b>",
        "\"quoted\"", "it's", "5 < 6", "teams.", "deliver,", "monitoring;", "${x}", "{{y}}",
        "</p>", "camps", "water", "districts", "reports",
    ];

    /// Free text of up to `max_words` words, including markup-like tokens
    /// that must be escaped.
    pub fn arb_text(max_words: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(WORDS), 0..=max_words)
            .prop_map(|words| words.join(" "))
    }

    /// Generate a full job, from very thin to fairly rich.
    pub fn arb_job() -> impl Strategy<Value = Job> {
        (
            "[A-Za-z][A-Za-z ]{0,80}",
            "[A-Za-z][A-Za-z &]{0,40}",
            "[A-Za-z ]{0,30}",
            arb_country(),
            arb_sector(),
            prop::option::of(arb_text(300)),
            prop::option::of(arb_text(120)),
            prop::option::of(arb_text(40)),
            arb_timestamp(),
            prop::option::of(arb_timestamp()),
        )
            .prop_map(
                |(
                    title,
                    organization,
                    location,
                    country,
                    sector,
                    description,
                    qualifications,
                    how_to_apply,
                    date_posted,
                    deadline,
                )| Job {
                    id: Uuid::now_v7(),
                    title,
                    organization,
                    location,
                    country,
                    sector,
                    description,
                    qualifications,
                    how_to_apply,
                    source_url: None,
                    date_posted,
                    deadline,
                },
            )
    }

    /// Generate a listing record.
    pub fn arb_job_record() -> impl Strategy<Value = JobRecord> {
        arb_job().prop_map(|job| job.record())
    }

    /// Generate listing filters, including messy casing and whitespace.
    pub fn arb_filters() -> impl Strategy<Value = JobFilters> {
        (
            prop::collection::vec(arb_country(), 0..4),
            prop::collection::vec(arb_sector(), 0..3),
            prop::option::of("[ a-zA-Z|,%]{0,12}"),
            prop::option::of(0usize..50),
        )
            .prop_map(|(country, sector, search, limit)| JobFilters {
                country,
                sector,
                search,
                limit,
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built jobs and boards for common scenarios.

    use super::*;

    /// A plain job in the given country and sector.
    pub fn job_fixture(country: &str, sector: &str) -> Job {
        new_job_fixture(country, sector).into_job()
    }

    /// Creation payload for a plain job in the given country and sector.
    pub fn new_job_fixture(country: &str, sector: &str) -> NewJob {
        NewJob {
            title: format!("{sector} Officer"),
            organization: "International Rescue Committee".to_string(),
            location: format!("{country} Field Office"),
            country: country.to_string(),
            sector: sector.to_string(),
            description: Some(format!(
                "Support the {sector} programme across field sites in {country}."
            )),
            qualifications: None,
            how_to_apply: None,
            source_url: None,
            date_posted: Utc::now(),
            deadline: None,
        }
    }

    /// A job with only a title and an organization.
    pub fn thin_job() -> Job {
        Job {
            id: Uuid::now_v7(),
            title: "Driver".to_string(),
            organization: "NRC".to_string(),
            location: String::new(),
            country: String::new(),
            sector: String::new(),
            description: None,
            qualifications: None,
            how_to_apply: None,
            source_url: None,
            date_posted: Utc::now(),
            deadline: None,
        }
    }

    /// A job with long free text in every optional field.
    pub fn rich_job() -> Job {
        let description = [
            "The Health Coordinator leads the design, delivery and monitoring of primary health care services across three districts.",
            "The role manages a multidisciplinary team of clinicians, community health workers and data officers, and represents the organization in the health cluster.",
            "Key responsibilities include supervising mobile clinics, strengthening referral pathways, coordinating disease surveillance and preparing donor reports.",
            "The coordinator works closely with ministry counterparts to align activities with national guidelines and to transfer skills to local staff.",
            "Regular travel to remote field locations is required, sometimes at short notice during outbreak response.",
        ]
        .join(" ");
        let qualifications = [
            "Advanced degree in public health, medicine or nursing.",
            "At least seven years of experience managing health programmes in humanitarian settings, including three years in a coordination role.",
            "Demonstrated experience with outbreak response, health information systems and budget management.",
            "Fluency in English is required; working knowledge of Swahili or Somali is an asset.",
        ]
        .join(" ");

        Job {
            id: Uuid::now_v7(),
            title: "Health Coordinator for Emergency Primary Care Programmes in Northern Kenya".to_string(),
            organization: "International Medical Corps".to_string(),
            location: "Lodwar".to_string(),
            country: "Kenya".to_string(),
            sector: "Health".to_string(),
            description: Some(description),
            qualifications: Some(qualifications),
            how_to_apply: Some(
                "Submit a CV and cover letter through the online recruitment portal before the deadline."
                    .to_string(),
            ),
            source_url: Some("https://careers.example.org/jobs/health-coordinator".to_string()),
            date_posted: Utc::now() - Duration::days(1),
            deadline: Some(Utc::now() + Duration::days(21)),
        }
    }

    /// Five Kenya jobs plus one each in Uganda and Somalia, newest first by
    /// construction order.
    pub fn sample_board() -> Vec<Job> {
        let now = Utc::now();
        let sectors = ["Health", "Education", "Logistics", "Protection", "Nutrition"];
        let mut jobs: Vec<Job> = sectors
            .iter()
            .enumerate()
            .map(|(i, sector)| {
                let mut job = job_fixture("Kenya", sector);
                job.date_posted = now - Duration::hours(i as i64);
                job
            })
            .collect();

        let mut uganda = job_fixture("Uganda", "Health");
        uganda.date_posted = now - Duration::hours(6);
        jobs.push(uganda);

        let mut somalia = job_fixture("Somalia", "Food Security");
        somalia.date_posted = now - Duration::hours(7);
        jobs.push(somalia);

        jobs
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for board-specific error shapes.

    use super::*;

    /// Assert that a result is a storage not-found error.
    pub fn assert_not_found<T: std::fmt::Debug>(result: &BoardResult<T>) {
        assert!(
            matches!(
                result,
                Err(BoardError::Storage(StorageError::NotFound { .. }))
            ),
            "Expected NotFound, got: {:?}",
            result
        );
    }

    /// Assert that a result is a labelled sanity-check failure.
    pub fn assert_sanity_check<T: std::fmt::Debug>(result: &BoardResult<T>, page: &str) {
        match result {
            Err(BoardError::SanityCheck { page: label, .. }) => {
                assert!(label.contains(page), "Label {label:?} does not mention {page:?}")
            }
            other => panic!("Expected SanityCheck for {page}, got: {other:?}"),
        }
    }

    /// Assert a body has at least `floor` whitespace-delimited words.
    pub fn assert_min_words(text: &str, floor: usize) {
        let count = text.split_whitespace().count();
        assert!(count >= floor, "Expected at least {floor} words, got {count}");
    }
}
