//! Site configuration for synthesized documents

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive character-length window for a piece of SEO metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBudget {
    pub min: usize,
    pub max: usize,
}

impl LengthBudget {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether a character count falls inside the window.
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

/// Settings consumed by the document synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Brand appended to page titles.
    pub site_name: String,
    /// Absolute origin used for canonical URLs and structured data.
    pub base_url: String,
    /// Minimum body word count for any served document.
    pub min_word_count: usize,
    pub title_len: LengthBudget,
    pub description_len: LengthBudget,
    /// How many recent jobs the homepage lists.
    pub recent_items_on_homepage: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Relief Jobs".to_string(),
            base_url: "https://jobs.example.org".to_string(),
            min_word_count: 250,
            title_len: LengthBudget::new(50, 60),
            description_len: LengthBudget::new(140, 160),
            recent_items_on_homepage: 10,
        }
    }
}

impl SiteConfig {
    /// Create SiteConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_SITE_NAME`: Brand used in titles (default: "Relief Jobs")
    /// - `BOARD_BASE_URL`: Public origin, no trailing slash
    /// - `BOARD_MIN_WORD_COUNT`: Word floor for documents (default: 250)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let site_name = std::env::var("BOARD_SITE_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.site_name);

        let base_url = std::env::var("BOARD_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let min_word_count = match std::env::var("BOARD_MIN_WORD_COUNT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid BOARD_MIN_WORD_COUNT, using default");
                defaults.min_word_count
            }),
            Err(_) => defaults.min_word_count,
        };

        Self {
            site_name,
            base_url,
            min_word_count,
            ..defaults
        }
    }

    /// Set the site name.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the minimum word count.
    pub fn with_min_word_count(mut self, floor: usize) -> Self {
        self.min_word_count = floor;
        self
    }

    /// Reject configurations the synthesizer cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, budget) in [
            ("title_len", self.title_len),
            ("description_len", self.description_len),
        ] {
            if budget.min > budget.max || budget.max == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: format!("{}..={}", budget.min, budget.max),
                    reason: "min must not exceed max and max must be positive".to_string(),
                });
            }
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
                reason: "must be an absolute http(s) URL".to_string(),
            });
        }

        if self.site_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "site_name".to_string(),
                value: self.site_name.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Build an absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
