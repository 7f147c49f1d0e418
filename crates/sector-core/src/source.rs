//! Price data source abstraction

use crate::table::PriceTable;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a price source can report for one request
#[derive(Debug, Error)]
pub enum SourceError {
    /// No ticker in the request returned any data
    #[error("No price data for any of {tickers:?}")]
    Empty { tickers: Vec<String> },

    /// The provider failed outright
    #[error("Provider error: {0}")]
    Provider(String),

    /// The requested date range cannot be served
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}

/// Inclusive calendar date range of a price request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SourceError> {
        if start > end {
            return Err(SourceError::InvalidRange(format!("{start} is after {end}")));
        }
        Ok(Self { start, end })
    }

    /// Range covering `days` calendar days up to `end`
    pub fn trailing(end: NaiveDate, days: u32) -> Result<Self, SourceError> {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| SourceError::InvalidRange(format!("{days} days before {end}")))?;
        Self::new(start, end)
    }
}

/// Provider of daily close prices
///
/// Implementations return one column per requested ticker, in request order,
/// over the trading dates they know of. Tickers without data become all-absent
/// columns; a request where no ticker has data fails with
/// [`SourceError::Empty`].
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch daily closes for `tickers` within `range`
    async fn fetch_closes(&self, tickers: &[String], range: DateRange) -> Result<PriceTable, SourceError>;

    /// Name used in logs
    fn name(&self) -> &str;
}
