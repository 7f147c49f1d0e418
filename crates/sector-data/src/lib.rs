//! Market data sources
//!
//! Implementations of [`sector_core::PriceSource`]. The only provider today is
//! Yahoo Finance, which needs no API key.

pub mod error;
pub mod yahoo;

pub use error::{DataError, Result};
pub use yahoo::YahooPriceSource;
