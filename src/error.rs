//! Unified error handling for skilluprs.
//!
//! Two failure families exist: validation errors raised before anything is
//! persisted, and storage errors from the underlying key-value store. Reads
//! never surface storage errors to callers (see the fail-open helpers in
//! `engine`); writes always do.

use thiserror::Error;

/// Unified error type for skilluprs operations.
#[derive(Debug, Error)]
pub enum SkillUpError {
    /// Read or write failure against the underlying key-value store.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Self-assessment rating outside the accepted 0-10 range.
    #[error("rating {rating} is out of range (expected 0 to 10)")]
    InvalidRating { rating: f64 },
}

impl From<rusqlite::Error> for SkillUpError {
    fn from(e: rusqlite::Error) -> Self {
        SkillUpError::Storage(e.to_string())
    }
}

/// Result type alias for skilluprs operations.
pub type Result<T> = std::result::Result<T, SkillUpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rating_display() {
        let err = SkillUpError::InvalidRating { rating: 11.0 };
        assert!(err.to_string().contains("11"));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_storage_display() {
        let err = SkillUpError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
