//! Content sanity checks.
//!
//! Every synthesized page passes through [`apply_sanity_checks`] before it is
//! returned. The renderer already makes unbalanced markup unreachable; these
//! checks catch regressions in it and content that is too thin to serve.

use jobboard_core::{BoardError, BoardResult, ContentError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Tags whose closer must share a line with its opener.
const LINE_SCOPED_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "li"];

/// Template markers that exempt a line from the orphan check.
const TEMPLATE_MARKERS: &[&str] = &["${", "{{"];

struct HtmlPatterns {
    closing_tag: Regex,
    h1: Regex,
    h2: Regex,
    h3: Regex,
    non_body: Regex,
    any_tag: Regex,
}

impl HtmlPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            closing_tag: Regex::new(&format!(r"(?i)</({})\s*>", LINE_SCOPED_TAGS.join("|")))?,
            h1: Regex::new(r"(?i)<h1[\s>]")?,
            h2: Regex::new(r"(?i)<h2[\s>]")?,
            h3: Regex::new(r"(?i)<h3[\s>]")?,
            non_body: Regex::new(
                r"(?is)<head[\s>].*?</head\s*>|<script[\s>].*?</script\s*>|<style[\s>].*?</style\s*>",
            )?,
            any_tag: Regex::new(r"(?s)<[^>]*>")?,
        })
    }
}

static PATTERNS: Lazy<Result<HtmlPatterns, regex::Error>> = Lazy::new(HtmlPatterns::compile);

fn patterns() -> Result<&'static HtmlPatterns, ContentError> {
    PATTERNS.as_ref().map_err(|e| ContentError::Pattern {
        reason: e.to_string(),
    })
}

/// Reject any line holding a closing `p`/`h1`-`h6`/`li` tag without its
/// opener on the same line. Lines carrying template markers are skipped.
pub fn check_for_orphaned_fragments(html: &str) -> Result<(), ContentError> {
    let patterns = patterns()?;

    for (index, line) in html.lines().enumerate() {
        if TEMPLATE_MARKERS.iter().any(|marker| line.contains(marker)) {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        for caps in patterns.closing_tag.captures_iter(&lower) {
            let tag = &caps[1];
            if !has_opening_tag(&lower, tag) {
                return Err(ContentError::OrphanedFragment {
                    line_number: index + 1,
                    line: line.trim().chars().take(120).collect(),
                });
            }
        }
    }
    Ok(())
}

fn has_opening_tag(line: &str, tag: &str) -> bool {
    let opener = format!("<{tag}");
    line.match_indices(&opener).any(|(at, _)| {
        matches!(
            line[at + opener.len()..].chars().next(),
            Some('>') | Some(' ') | Some('\t') | Some('/')
        )
    })
}

/// Require exactly one H1 and at least one H2 and H3.
pub fn validate_html_structure(html: &str) -> Result<(), ContentError> {
    let patterns = patterns()?;

    match patterns.h1.find_iter(html).count() {
        0 => return Err(ContentError::MissingHeading { level: 1 }),
        1 => {}
        count => return Err(ContentError::MultipleH1 { count }),
    }
    if !patterns.h2.is_match(html) {
        return Err(ContentError::MissingHeading { level: 2 });
    }
    if !patterns.h3.is_match(html) {
        return Err(ContentError::MissingHeading { level: 3 });
    }
    Ok(())
}

/// Count visible body words: head, script and style blocks are dropped,
/// remaining tags are stripped and whitespace-delimited tokens counted.
pub fn count_words(html: &str) -> Result<usize, ContentError> {
    let patterns = patterns()?;
    let body = patterns.non_body.replace_all(html, " ");
    let text = patterns.any_tag.replace_all(&body, " ");
    Ok(text.split_whitespace().count())
}

/// Fail if the page has fewer than `floor` visible words.
pub fn assert_min_word_count(html: &str, floor: usize) -> Result<(), ContentError> {
    let count = count_words(html)?;
    if count < floor {
        return Err(ContentError::BelowWordCount { count, floor });
    }
    Ok(())
}

/// Run every check in order, labelling the first failure with `label`.
///
/// `floor` is the minimum visible word count for the page.
pub fn apply_sanity_checks(html: &str, label: &str, floor: usize) -> BoardResult<()> {
    check_for_orphaned_fragments(html)
        .and_then(|()| validate_html_structure(html))
        .and_then(|()| assert_min_word_count(html, floor))
        .map_err(|source| {
            warn!(page = %label, error = %source, "Sanity check failed");
            BoardError::sanity_check(label, source)
        })
}
