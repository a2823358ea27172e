//! CLI error type.

use std::fmt;
use std::path::PathBuf;

use vimetile::dataset::DatasetError;
use vimetile::pipeline::ChunkError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    Config(String),
    /// Logging could not be initialized.
    Logging(String),
    /// The async runtime or HTTP client could not be created.
    Runtime(String),
    /// The dataset could not be opened.
    Dataset(DatasetError),
    /// The requested level does not exist.
    LevelOutOfRange { level: u32, levels: usize },
    /// The chunk download failed.
    Chunk(ChunkError),
    /// The download was cancelled by the user.
    Cancelled,
    /// The output file could not be written.
    Output { path: PathBuf, reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to start: {}", msg),
            CliError::Dataset(e) => write!(f, "Failed to open dataset: {}", e),
            CliError::LevelOutOfRange { level, levels } => write!(
                f,
                "Level {} does not exist (dataset has levels 0..={})",
                level,
                levels.saturating_sub(1)
            ),
            CliError::Chunk(e) => write!(f, "Chunk download failed: {}", e),
            CliError::Cancelled => write!(f, "Cancelled"),
            CliError::Output { path, reason } => {
                write!(f, "Failed to write {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        CliError::Dataset(e)
    }
}

impl From<ChunkError> for CliError {
    fn from(e: ChunkError) -> Self {
        CliError::Chunk(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_out_of_range_message() {
        let err = CliError::LevelOutOfRange {
            level: 7,
            levels: 3,
        };
        assert_eq!(
            err.to_string(),
            "Level 7 does not exist (dataset has levels 0..=2)"
        );
    }

    #[test]
    fn test_dataset_error_converts() {
        let err: CliError = DatasetError::InvalidUrl {
            url: "x".to_string(),
            reason: "missing scheme".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Failed to open dataset"));
    }
}
