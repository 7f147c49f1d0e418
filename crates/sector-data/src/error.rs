//! Error types for market data providers

use sector_core::SourceError;
use thiserror::Error;

/// Market data provider errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// A timestamp could not be converted
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Convert DataError to the source error the pipeline understands
impl From<DataError> for SourceError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidTimestamp(msg) => SourceError::InvalidRange(msg),
            other => SourceError::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::DataUnavailable {
            symbol: "STRK".to_string(),
            reason: "No quotes returned".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for STRK: No quotes returned");
    }

    #[test]
    fn test_error_conversion() {
        let source: SourceError = DataError::YahooFinanceError("timeout".to_string()).into();
        match source {
            SourceError::Provider(msg) => assert!(msg.contains("Yahoo Finance error")),
            other => panic!("Expected Provider variant, got {other:?}"),
        }

        let source: SourceError = DataError::InvalidTimestamp("bad".to_string()).into();
        assert!(matches!(source, SourceError::InvalidRange(_)));
    }
}
