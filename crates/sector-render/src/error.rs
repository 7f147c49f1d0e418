//! Error types for rendering and export

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while producing or reading artifacts
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template parsing or rendering failed
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    /// Artifact could not be written or read
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Exported data does not describe valid index series
    #[error("Malformed export: {0}")]
    MalformedExport(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
