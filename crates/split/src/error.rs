//! Error types for the splitter.
//!
//! Every variant is a configuration error: the splitter is pure computation,
//! so nothing here is transient or worth retrying. Oversize chunks are not
//! errors; they are flagged on the output instead.

use seam_core::AppError;
use thiserror::Error;

/// Result type alias for splitter operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors raised by splitter construction and output assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Target chunk size was zero
    #[error("chunk size must be a positive number of characters")]
    InvalidChunkSize,

    /// Overlap can never be satisfied by a chunk of at most `chunk_size` characters
    #[error("overlap ({overlap}) is larger than the chunk size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },

    /// A separator in the cascade was the empty string
    #[error("separator #{index} is empty")]
    EmptySeparator { index: usize },

    /// A placeholder marker could not be registered
    #[error("invalid placeholder marker for separator {separator:?}: {reason}")]
    InvalidMarker { separator: String, reason: String },

    /// A metadata value list does not line up with the chunk sequence
    #[error("length of metadata '{key}' ({actual}) does not match the number of chunks ({expected})")]
    MetadataLength {
        key: String,
        expected: usize,
        actual: usize,
    },
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_length_message() {
        let err = SplitError::MetadataLength {
            key: "source".to_string(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "length of metadata 'source' (3) does not match the number of chunks (2)"
        );
    }

    #[test]
    fn test_converts_to_config_error() {
        let err: AppError = SplitError::InvalidChunkSize.into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
