//! Error types for pipeline runs

use sector_core::IndexError;
use thiserror::Error;

/// Result type alias for pipeline runs
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures that abort a whole run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every configured sector was skipped
    #[error("No sector produced an index ({attempted} attempted)")]
    AllSectorsFailed { attempted: usize },

    /// The run configuration is invalid
    #[error(transparent)]
    Config(#[from] IndexError),

    /// The lookback window cannot be turned into a date range
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::AllSectorsFailed { attempted: 5 };
        assert_eq!(err.to_string(), "No sector produced an index (5 attempted)");

        let err: PipelineError = IndexError::InvalidConfig("no sectors".to_string()).into();
        assert_eq!(err.to_string(), "Invalid configuration: no sectors");
    }
}
