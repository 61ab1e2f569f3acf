//! Error types for job board operations

use thiserror::Error;
use uuid::Uuid;

/// Storage collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Job not found: {id}")]
    NotFound { id: Uuid },

    #[error("Insert failed: {reason}")]
    InsertFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Structural or content-quality violations found in a synthesized document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Orphaned closing tag on line {line_number}: {line}")]
    OrphanedFragment { line_number: usize, line: String },

    #[error("Missing <h{level}> heading")]
    MissingHeading { level: u8 },

    #[error("Expected exactly one <h1>, found {count}")]
    MultipleH1 { count: usize },

    #[error("Word count {count} is below the floor of {floor}")]
    BelowWordCount { count: usize, floor: usize },

    #[error("Context table {table} entry '{key}' contains forbidden token '{token}'")]
    ContextTableInjection {
        table: String,
        key: String,
        token: String,
    },

    #[error("Validator pattern failed to compile: {reason}")]
    Pattern { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for the job board subsystem.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sanity check failed for {page}: {source}")]
    SanityCheck {
        page: String,
        #[source]
        source: ContentError,
    },
}

impl BoardError {
    /// Attach a page label to a content failure.
    pub fn sanity_check(page: impl Into<String>, source: ContentError) -> Self {
        Self::SanityCheck {
            page: page.into(),
            source,
        }
    }

    /// True for failures produced by document validation.
    pub fn is_content_failure(&self) -> bool {
        matches!(self, Self::Content(_) | Self::SanityCheck { .. })
    }
}

/// Result type alias for job board operations.
pub type BoardResult<T> = Result<T, BoardError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound { id: Uuid::nil() };
        let msg = format!("{}", err);
        assert!(msg.contains("Job not found"));
        assert!(msg.contains(&Uuid::nil().to_string()));
    }

    #[test]
    fn test_content_error_display() {
        let err = ContentError::BelowWordCount {
            count: 120,
            floor: 250,
        };
        assert_eq!(err.to_string(), "Word count 120 is below the floor of 250");

        let err = ContentError::MissingHeading { level: 3 };
        assert!(err.to_string().contains("<h3>"));
    }

    #[test]
    fn test_sanity_check_carries_label() {
        let err = BoardError::sanity_check(
            "detail:abc",
            ContentError::MissingHeading { level: 2 },
        );
        let msg = err.to_string();
        assert!(msg.contains("detail:abc"));
        assert!(msg.contains("<h2>"));
        assert!(err.is_content_failure());
    }

    #[test]
    fn test_board_error_from_storage() {
        let err: BoardError = StorageError::LockPoisoned.into();
        assert!(matches!(err, BoardError::Storage(StorageError::LockPoisoned)));
        assert!(!err.is_content_failure());
    }
}
