//! Error types for index construction

use crate::summary::ReturnWindow;
use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors raised while building or summarizing sector indices
#[derive(Debug, Error)]
pub enum IndexError {
    /// The price table has no rows at all
    #[error("Price table is empty")]
    EmptyTable,

    /// Too few rows survive cleaning to compute a return
    #[error("Insufficient history: {rows} row(s), need at least {required}")]
    InsufficientHistory { rows: usize, required: usize },

    /// Too few observations for a trailing return window
    #[error("Insufficient history for {window} return: {observations} observation(s), need at least {required}")]
    InsufficientWindow {
        window: ReturnWindow,
        observations: usize,
        required: usize,
    },

    /// A ticker column does not match the table's date axis
    #[error("Column for {ticker} has {actual} value(s), expected {expected}")]
    ShapeMismatch {
        ticker: String,
        expected: usize,
        actual: usize,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be loaded
    #[error(transparent)]
    ConfigFile(#[from] sector_utils::ConfigFileError),
}
