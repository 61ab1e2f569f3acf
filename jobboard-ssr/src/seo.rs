//! SEO metadata generation and smart truncation.

use jobboard_core::{LengthBudget, SiteConfig};
use serde::Serialize;

use crate::render::collapse_whitespace;

/// How far back from the cutoff a word boundary may be used.
pub const BOUNDARY_TOLERANCE: usize = 10;

/// Title used when a job has none.
const FALLBACK_JOB_TITLE: &str = "Humanitarian Job";

/// Short title extensions that close the gap to the minimum length.
const TITLE_FILLERS: &[&str] = &[" Worldwide", " Online", " Today", " Now"];

/// Short description extensions that close the gap to the minimum length.
const DESCRIPTION_FILLERS: &[&str] = &[" Updated daily.", " Apply today.", " Search for free."];

/// Characters stripped from the end of a cut string before a suffix is added.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '-', '|', '/', '(', '&', '\u{2013}', '\u{2014}',
];

/// Kind of page the metadata is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Listing,
    Detail,
}

/// Inputs for metadata generation. Empty strings mean "unknown".
#[derive(Debug, Clone, PartialEq)]
pub struct SeoContext {
    pub page: PageKind,
    /// Raw title candidate (job title on detail pages).
    pub title: String,
    /// Raw description candidate (job description on detail pages).
    pub description: String,
    pub organization: String,
    pub location: String,
    pub country: String,
    pub sector: String,
    /// Total jobs on the board (home) or matching the query (listing).
    pub job_count: usize,
    /// Distinct hiring organizations, when known.
    pub organization_count: usize,
}

impl SeoContext {
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            title: String::new(),
            description: String::new(),
            organization: String::new(),
            location: String::new(),
            country: String::new(),
            sector: String::new(),
            job_count: 0,
            organization_count: 0,
        }
    }
}

/// Generated head metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

/// Page-type-aware metadata generator.
#[derive(Debug, Clone)]
pub struct SeoGenerator {
    site_name: String,
    title_len: LengthBudget,
    description_len: LengthBudget,
}

impl SeoGenerator {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            title_len: config.title_len,
            description_len: config.description_len,
        }
    }

    pub fn generate(&self, ctx: &SeoContext) -> SeoMeta {
        let (title_base, title_extensions) = self.title_template(ctx);
        let (description_base, description_extensions) = self.description_template(ctx);
        let brand = format!(" | {}", self.site_name);

        SeoMeta {
            title: fit_to_budget(&title_base, &title_extensions, &brand, self.title_len),
            description: fit_to_budget(
                &description_base,
                &description_extensions,
                "",
                self.description_len,
            ),
            keywords: keywords(ctx),
        }
    }

    fn title_template(&self, ctx: &SeoContext) -> (String, Vec<String>) {
        let (base, mut extensions) = match ctx.page {
            PageKind::Home => (
                format!("{} Humanitarian Jobs and NGO Careers", ctx.job_count),
                vec![" - Updated Daily".to_string(), " - Apply Today".to_string()],
            ),
            PageKind::Listing => {
                let base = match (filled(&ctx.sector), filled(&ctx.country), filled(&ctx.title)) {
                    (Some(sector), Some(country), _) => format!("{sector} Jobs in {country}"),
                    (Some(sector), None, _) => format!("{sector} Jobs"),
                    (None, Some(country), _) => format!("Humanitarian Jobs in {country}"),
                    (None, None, Some(search)) => format!("{search} Jobs"),
                    (None, None, None) => "Humanitarian and NGO Jobs".to_string(),
                };
                (
                    base,
                    vec![
                        format!(" - {} Openings", ctx.job_count),
                        " - NGO and UN Careers".to_string(),
                        " - Apply Today".to_string(),
                    ],
                )
            }
            PageKind::Detail => {
                let title = filled(&ctx.title).unwrap_or(FALLBACK_JOB_TITLE);
                let base = match filled(&ctx.organization) {
                    Some(organization) => format!("{title} at {organization}"),
                    None => title.to_string(),
                };
                let mut extensions = Vec::new();
                if let Some(country) = filled(&ctx.country) {
                    extensions.push(format!(" in {country}"));
                }
                if let Some(sector) = filled(&ctx.sector) {
                    extensions.push(format!(" - {sector} Job"));
                }
                extensions.push(" - Humanitarian Careers".to_string());
                extensions.push(" - Apply Now".to_string());
                (base, extensions)
            }
        };
        extensions.extend(TITLE_FILLERS.iter().map(|s| s.to_string()));
        (base, extensions)
    }

    fn description_template(&self, ctx: &SeoContext) -> (String, Vec<String>) {
        let mut generic = vec![
            format!(" Browse verified vacancies on {}.", self.site_name),
            " New roles from NGOs, UN agencies and charities are added every day.".to_string(),
            " Apply directly with the hiring organization.".to_string(),
        ];
        generic.extend(DESCRIPTION_FILLERS.iter().map(|s| s.to_string()));

        let base = match ctx.page {
            PageKind::Home => format!(
                "Find {} humanitarian, development and NGO jobs from {} organizations.",
                ctx.job_count, ctx.organization_count
            ),
            PageKind::Listing => {
                let scope = match (filled(&ctx.sector), filled(&ctx.country)) {
                    (Some(sector), Some(country)) => format!("{sector} jobs in {country}"),
                    (Some(sector), None) => format!("{sector} jobs"),
                    (None, Some(country)) => format!("humanitarian jobs in {country}"),
                    (None, None) => "humanitarian and development jobs".to_string(),
                };
                format!("Explore {} open {scope}.", ctx.job_count)
            }
            PageKind::Detail => {
                let summary = collapse_whitespace(&ctx.description);
                if summary.is_empty() {
                    let title = filled(&ctx.title).unwrap_or(FALLBACK_JOB_TITLE);
                    let place = join_nonempty(&[&ctx.location, &ctx.country], ", ");
                    let mut sentence = match filled(&ctx.organization) {
                        Some(organization) => format!("{organization} is hiring a {title}"),
                        None => format!("Now hiring: {title}"),
                    };
                    if !place.is_empty() {
                        sentence.push_str(" in ");
                        sentence.push_str(&place);
                    }
                    sentence.push('.');
                    sentence
                } else {
                    summary
                }
            }
        };
        (base, generic)
    }
}

/// Build a string inside `budget`.
///
/// The base is smart-truncated to the room left by the suffix, then
/// extensions are appended in order while the result is shorter than
/// `budget.min`. An extension that would push `body + suffix` past
/// `budget.max` is skipped and the next one is tried. A suffix that leaves no
/// room for a meaningful body is dropped.
///
/// The minimum is reached whenever the remaining extensions include enough
/// entries no longer than the budget window (`max - min + 1`).
pub fn fit_to_budget(
    base: &str,
    extensions: &[String],
    suffix: &str,
    budget: LengthBudget,
) -> String {
    let suffix = if suffix.chars().count() + BOUNDARY_TOLERANCE * 2 > budget.max {
        ""
    } else {
        suffix
    };
    let room = budget.max - suffix.chars().count();

    let mut body = smart_truncate(&collapse_whitespace(base), room);
    for extension in extensions {
        if with_suffix(&body, suffix).chars().count() >= budget.min {
            break;
        }
        let candidate = if body.is_empty() {
            extension.trim_start().to_string()
        } else {
            format!("{body}{extension}")
        };
        if with_suffix(&candidate, suffix).chars().count() <= budget.max {
            body = candidate;
        }
    }
    with_suffix(&body, suffix)
}

fn with_suffix(body: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        body.to_string()
    } else {
        format!("{}{}", strip_trailing_punctuation(body), suffix)
    }
}

/// Shorten `text` to at most `max` characters without cutting a word.
///
/// The cut goes at the last whitespace at or before the cutoff when that lies
/// within [`BOUNDARY_TOLERANCE`] characters of it, otherwise exactly at the
/// cutoff. Trailing punctuation left by a cut is stripped. Text that already
/// fits is returned unchanged.
pub fn smart_truncate(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }

    let earliest = max.saturating_sub(BOUNDARY_TOLERANCE);
    let cut = (earliest..=max)
        .rev()
        .find(|&i| chars[i].is_whitespace())
        .unwrap_or(max);

    let head: String = chars[..cut].iter().collect();
    strip_trailing_punctuation(&head).to_string()
}

/// Strip trailing whitespace and punctuation.
pub fn strip_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c))
}

fn keywords(ctx: &SeoContext) -> Vec<String> {
    let mut candidates: Vec<String> = vec![
        ctx.sector.clone(),
        ctx.country.clone(),
        ctx.organization.clone(),
        ctx.location.clone(),
    ];
    if !ctx.sector.is_empty() {
        candidates.push(format!("{} jobs", ctx.sector));
    }
    if !ctx.country.is_empty() {
        candidates.push(format!("jobs in {}", ctx.country));
    }
    candidates.extend(
        ["humanitarian jobs", "NGO jobs", "development careers"]
            .iter()
            .map(|s| s.to_string()),
    );

    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .map(|k| collapse_whitespace(&k))
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .collect()
}

fn filled(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn join_nonempty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SeoGenerator {
        SeoGenerator::new(&SiteConfig::default())
    }

    #[test]
    fn test_truncate_at_boundary_58() {
        // 58 chars, a space, then a long word crossing the 60-char cutoff.
        let head = format!("{} {}", "a".repeat(28), "b".repeat(29));
        assert_eq!(head.chars().count(), 58);
        let text = format!("{head} consequential tail");

        let out = smart_truncate(&text, 60);
        assert_eq!(out, head);
        assert!(out.chars().count() <= 60);
    }

    #[test]
    fn test_truncate_hard_cuts_without_boundary() {
        let text = format!("{} {}", "a".repeat(40), "b".repeat(40));
        let out = smart_truncate(&text, 60);
        assert_eq!(out.chars().count(), 60);
        assert_eq!(out, text.chars().take(60).collect::<String>());
    }

    #[test]
    fn test_truncate_keeps_word_ending_at_cutoff() {
        let text = format!("{} next", "a".repeat(60));
        assert_eq!(smart_truncate(&text, 60), "a".repeat(60));
    }

    #[test]
    fn test_truncate_strips_trailing_punctuation() {
        let text = format!("{}, and more words follow here", "word ".repeat(10).trim_end());
        let out = smart_truncate(&text, 52);
        assert!(!out.ends_with(','));
        assert!(!out.ends_with(' '));
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(smart_truncate("Short title.", 60), "Short title.");
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(70);
        assert_eq!(smart_truncate(&text, 60).chars().count(), 60);
    }

    #[test]
    fn test_suffix_follows_stripped_body() {
        let out = fit_to_budget(
            "Logistics Officer, Supply Chain and Fleet Management: Senior Level",
            &[],
            " | Relief Jobs",
            LengthBudget::new(50, 60),
        );
        assert!(out.ends_with(" | Relief Jobs"));
        assert!(out.chars().count() <= 60);
        assert!(!out.contains(": |") && !out.contains(", |"));
    }

    #[test]
    fn test_detail_meta_in_budget() {
        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = "Nurse".to_string();
        ctx.organization = "MSF".to_string();
        ctx.country = "Kenya".to_string();
        ctx.sector = "Health".to_string();

        let meta = generator().generate(&ctx);
        let title_len = meta.title.chars().count();
        let description_len = meta.description.chars().count();
        assert!((50..=60).contains(&title_len), "{} ({title_len})", meta.title);
        assert!((140..=160).contains(&description_len), "{} ({description_len})", meta.description);
        assert!(meta.title.starts_with("Nurse at MSF in Kenya"));
        assert!(meta.keywords.contains(&"Health".to_string()));
    }

    #[test]
    fn test_sparse_detail_title_reaches_minimum() {
        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = "Nurse".to_string();
        ctx.organization = "MSF".to_string();

        let meta = generator().generate(&ctx);
        let title_len = meta.title.chars().count();
        assert!((50..=60).contains(&title_len), "{} ({title_len})", meta.title);
        assert!(meta.title.starts_with("Nurse at MSF"));
        assert!(meta.title.ends_with(" | Relief Jobs"));
    }

    #[test]
    fn test_overflowing_extension_skipped_for_later_one() {
        let out = fit_to_budget(
            "Nurse at MSF",
            &[
                " - Humanitarian Careers".to_string(),
                " - Apply Now".to_string(),
                " Today".to_string(),
            ],
            " | Relief Jobs",
            LengthBudget::new(50, 60),
        );
        assert_eq!(out, "Nurse at MSF - Humanitarian Careers Today | Relief Jobs");
    }

    #[test]
    fn test_blank_detail_fields_use_fallbacks() {
        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = "   ".to_string();

        let meta = generator().generate(&ctx);
        assert!(meta.title.starts_with(FALLBACK_JOB_TITLE), "{}", meta.title);
        assert!(meta.description.starts_with("Now hiring: Humanitarian Job."));
        assert!((50..=60).contains(&meta.title.chars().count()));
        assert!((140..=160).contains(&meta.description.chars().count()));
    }

    #[test]
    fn test_punctuation_only_description_is_refilled() {
        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = "Nurse".to_string();
        ctx.description = ".".repeat(300);

        let meta = generator().generate(&ctx);
        assert!(meta.description.starts_with("Browse verified"), "{}", meta.description);
        assert!((140..=160).contains(&meta.description.chars().count()));
    }

    #[test]
    fn test_long_site_name_drops_suffix() {
        let out = fit_to_budget(
            "Nurse at MSF",
            &[
                " - Humanitarian Careers".to_string(),
                " - Apply Now".to_string(),
                " Worldwide".to_string(),
            ],
            &format!(" | {}", "x".repeat(45)),
            LengthBudget::new(40, 60),
        );
        assert!(!out.contains('|'));
        assert!((40..=60).contains(&out.chars().count()), "{out}");
    }

    #[test]
    fn test_home_meta_in_budget() {
        let mut ctx = SeoContext::new(PageKind::Home);
        ctx.job_count = 1240;
        ctx.organization_count = 85;
        let meta = generator().generate(&ctx);
        assert!(meta.title.chars().count() <= 60);
        assert!(meta.title.chars().count() >= 50, "{}", meta.title);
        assert!((140..=160).contains(&meta.description.chars().count()));
    }

    #[test]
    fn test_long_description_truncated() {
        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = "Nurse".to_string();
        ctx.description = "word ".repeat(100);
        let meta = generator().generate(&ctx);
        assert!(meta.description.chars().count() <= 160);
        assert!(meta.description.ends_with("word"));
    }

    #[test]
    fn test_keywords_deduplicated() {
        let mut ctx = SeoContext::new(PageKind::Listing);
        ctx.country = "Kenya".to_string();
        ctx.location = "kenya".to_string();
        let kw = keywords(&ctx);
        assert_eq!(kw.iter().filter(|k| k.eq_ignore_ascii_case("kenya")).count(), 1);
    }
}
