//! Jobboard SSR - Validated Document Synthesis
//!
//! Builds complete HTML documents for crawlers: a typed [`document::Document`]
//! is assembled per page kind, rendered with every text node escaped, padded
//! up to the configured word floor and gated by the content validator before
//! it leaves the crate. Also hosts SEO metadata generation, JSON-LD builders
//! and user-agent based crawler detection.

pub mod bot;
pub mod context;
pub mod document;
pub mod jsonld;
mod pages;
pub mod render;
pub mod seo;
pub mod synthesizer;
pub mod validate;

pub use bot::is_bot;
pub use context::ContextTables;
pub use document::{Block, Document, Head, Inline, Section, Subsection};
pub use render::{collapse_whitespace, escape, render};
pub use seo::{
    fit_to_budget, smart_truncate, strip_trailing_punctuation, PageKind, SeoContext, SeoGenerator,
    SeoMeta,
};
pub use synthesizer::Synthesizer;
pub use validate::{
    apply_sanity_checks, assert_min_word_count, check_for_orphaned_fragments, count_words,
    validate_html_structure,
};
