//! Document synthesizer: the public entry points for the three page kinds.

use jobboard_core::{BoardResult, BoardStats, Job, JobFilters, JobRecord, SiteConfig};
use tracing::debug;

use crate::context::ContextTables;
use crate::document::Document;
use crate::pages::padding_sections;
use crate::render::render;
use crate::seo::SeoGenerator;
use crate::validate::{apply_sanity_checks, count_words};

/// Builds validated HTML documents for the homepage, listing pages and job
/// detail pages.
///
/// Every public render method returns either a complete document that has
/// passed [`apply_sanity_checks`] or a labelled
/// [`BoardError::SanityCheck`](jobboard_core::BoardError::SanityCheck).
#[derive(Debug, Clone)]
pub struct Synthesizer {
    pub(crate) config: SiteConfig,
    pub(crate) seo: SeoGenerator,
    pub(crate) context: ContextTables,
}

impl Synthesizer {
    /// Validate the configuration and context tables and build a synthesizer.
    pub fn new(config: SiteConfig) -> BoardResult<Self> {
        config.validate()?;
        let context = ContextTables::new()?;
        let seo = SeoGenerator::new(&config);
        Ok(Self {
            config,
            seo,
            context,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Homepage from board statistics and the most recent jobs.
    pub fn render_homepage(&self, stats: &BoardStats, recent: &[JobRecord]) -> BoardResult<String> {
        let limit = self.config.recent_items_on_homepage;
        let recent = &recent[..recent.len().min(limit)];
        self.finish(self.homepage_document(stats, recent), "homepage")
    }

    /// Listing page for one page of results out of `total` matches.
    pub fn render_listing_page(
        &self,
        items: &[JobRecord],
        total: usize,
        filters: &JobFilters,
    ) -> BoardResult<String> {
        let label = format!("listing:{}", listing_label(filters));
        self.finish(self.listing_document(items, total, filters), &label)
    }

    /// Detail page for a single job.
    pub fn render_detail_page(&self, job: &Job) -> BoardResult<String> {
        let label = format!("detail:{}", job.id);
        self.finish(self.detail_document(job), &label)
    }

    /// Pad to the word floor, render and gate.
    fn finish(&self, mut doc: Document, label: &str) -> BoardResult<String> {
        let floor = self.config.min_word_count;
        let mut html = render(&doc);
        let mut words = count_words(&html)?;
        let mut padding = padding_sections(&self.config.site_name).into_iter();
        let mut padded = 0usize;

        while words < floor {
            let Some(section) = padding.next() else {
                break;
            };
            doc.push_section(section);
            html = render(&doc);
            words = count_words(&html)?;
            padded += 1;
        }

        apply_sanity_checks(&html, label, floor)?;
        debug!(page = %label, words, padded, "Document synthesized");
        Ok(html)
    }
}

fn listing_label(filters: &JobFilters) -> String {
    let mut parts = Vec::new();
    if !filters.country.is_empty() {
        parts.push(format!("country={}", filters.country.join(",")));
    }
    if !filters.sector.is_empty() {
        parts.push(format!("sector={}", filters.sector.join(",")));
    }
    if let Some(term) = filters.search_term() {
        parts.push(format!("search={term}"));
    }
    if parts.is_empty() {
        "all".to_string()
    } else {
        parts.join("&")
    }
}
