//! Error types for bidi processing.

use thiserror::Error;

/// Result type for bidi operations.
pub type Result<T> = std::result::Result<T, BidiError>;

/// Errors surfaced at the API boundary.
///
/// Everything inside the algorithm (embedding overflow, unmatched
/// isolates, bracket stack overflow) has a defined fallback and is not an
/// error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidiError {
    /// A caller-supplied paragraph embedding level was not 0 or 1.
    #[error("invalid paragraph embedding level {0}, expected 0 or 1")]
    InvalidParagraphLevel(u8),
}

/// Check a caller-supplied paragraph level.
pub fn validate_paragraph_level(level: Option<u8>) -> Result<Option<u8>> {
    match level {
        Some(l) if l > 1 => Err(BidiError::InvalidParagraphLevel(l)),
        other => Ok(other),
    }
}
