//! Configuration file loading

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a configuration file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and deserialize a JSON configuration file
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigFileError> {
    let path = path.as_ref();
    tracing::debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
