//! Dataset-level errors.
//!
//! Any of these makes the dataset unusable; no partial dataset is exposed.

use thiserror::Error;

use crate::stack::MetadataValidationError;
use crate::transport::TransportError;

/// Errors raised while opening a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The connection string could not be parsed.
    #[error("invalid dataset URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The stack info request failed.
    #[error("failed to fetch stack info for {stack}: {source}")]
    MetadataFetch {
        stack: String,
        #[source]
        source: TransportError,
    },

    /// The stack info document is malformed.
    #[error(transparent)]
    MetadataValidation(#[from] MetadataValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_transparent() {
        let err: DatasetError = MetadataValidationError::missing("grid_nr").into();
        assert_eq!(err.to_string(), "invalid stack info field `grid_nr`: missing");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = DatasetError::MetadataFetch {
            stack: "http://host:p1/s1/raw@3.0".to_string(),
            source: TransportError::Status {
                url: "http://host/project/p1/stack/s1/type/raw/3/0/stackinfo".to_string(),
                status: 503,
            },
        };
        assert!(err.to_string().contains("HTTP 503"));
    }
}
