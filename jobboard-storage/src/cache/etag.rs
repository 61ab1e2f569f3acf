//! ETag derivation and conditional-request matching.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::key::CacheKey;
use super::version::Version;

/// Number of digest bytes kept in the tag (hex-encoded, so twice as many chars).
const TAG_BYTES: usize = 16;

/// Opaque, quoted strong validator.
///
/// A pure function of `(version, key)`: identical inputs always yield the
/// same tag, and a new version yields a different tag for every key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Derive the tag for a key at a version.
    pub fn derive(version: Version, key: &CacheKey) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(version.as_millis().to_be_bytes());
        hasher.update([0u8]);
        hasher.update(key.as_str().as_bytes());
        let digest = hasher.finalize();
        Self(format!("\"{}\"", hex::encode(&digest[..TAG_BYTES])))
    }

    /// The quoted header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Evaluate an `If-None-Match` header value against this tag.
    ///
    /// Accepts `*`, comma-separated lists and weak (`W/`) validators, which
    /// compare by opaque value as RFC 9110 prescribes for `If-None-Match`.
    pub fn matches_header(&self, if_none_match: &str) -> bool {
        if_none_match.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == self.0
        })
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::JobFilters;

    fn key() -> CacheKey {
        CacheKey::from_filters(&JobFilters::new().with_country("Kenya"))
    }

    #[test]
    fn test_deterministic() {
        let v = Version::from_millis(1_700_000_000_000);
        assert_eq!(ETag::derive(v, &key()), ETag::derive(v, &key()));
    }

    #[test]
    fn test_version_changes_tag() {
        let a = ETag::derive(Version::from_millis(1), &key());
        let b = ETag::derive(Version::from_millis(2), &key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_changes_tag() {
        let v = Version::from_millis(1);
        let other = CacheKey::from_filters(&JobFilters::new().with_country("Uganda"));
        assert_ne!(ETag::derive(v, &key()), ETag::derive(v, &other));
    }

    #[test]
    fn test_tag_is_quoted_hex() {
        let tag = ETag::derive(Version::from_millis(7), &CacheKey::stats());
        let s = tag.as_str();
        assert!(s.starts_with('"') && s.ends_with('"'));
        assert_eq!(s.len(), TAG_BYTES * 2 + 2);
        assert!(s[1..s.len() - 1].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_matches_header() {
        let tag = ETag::derive(Version::from_millis(7), &key());
        assert!(tag.matches_header(tag.as_str()));
        assert!(tag.matches_header(&format!("W/{}", tag)));
        assert!(tag.matches_header(&format!("\"other\", {}", tag)));
        assert!(tag.matches_header("*"));
        assert!(!tag.matches_header("\"other\""));
        assert!(!tag.matches_header(""));
    }
}
