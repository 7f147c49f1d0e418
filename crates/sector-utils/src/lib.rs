//! Shared utilities for sector-indices
//!
//! This crate provides common functionality used across the workspace:
//! tracing subscriber setup and JSON configuration file loading.

pub mod config;
pub mod logging;

pub use config::{ConfigFileError, load_json};
pub use logging::{LogFormat, init_tracing_with};
