//! Yahoo Finance daily close source

use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use sector_core::{DateRange, PriceSource, PriceTable, SourceError};
use std::num::NonZeroU32;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Daily adjusted closes from Yahoo Finance
///
/// Tickers are requested concurrently; every request waits on a shared rate
/// limiter first. A ticker the provider cannot serve becomes an all-absent
/// column instead of failing the whole sector.
#[derive(Clone)]
pub struct YahooPriceSource {
    connector: Arc<yahoo::YahooConnector>,
    rate_limiter: SharedRateLimiter,
}

impl YahooPriceSource {
    /// Create a source allowing `requests_per_minute` provider calls
    pub fn new(requests_per_minute: u32) -> Result<Self> {
        let per_minute = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
            DataError::ConfigError("requests_per_minute must be greater than 0".to_string())
        })?;

        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::YahooFinanceError(e.to_string()))?;

        Ok(Self {
            connector: Arc::new(connector),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
        })
    }

    /// Daily (date, adjusted close) pairs for one symbol
    pub async fn fetch_history(&self, symbol: &str, range: DateRange) -> Result<Vec<(NaiveDate, f64)>> {
        let (start, end) = to_provider_range(range)?;

        self.rate_limiter.until_ready().await;
        debug!(symbol, %range.start, %range.end, "Requesting quote history");

        let response = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| DataError::YahooFinanceError(e.to_string()))?;

        let quotes = response.quotes().map_err(|e| DataError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;

        Ok(quotes
            .iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0)
                    .map(|ts| (ts.date_naive(), q.adjclose))
            })
            .filter(|(date, _)| *date >= range.start && *date <= range.end)
            .collect())
    }
}

/// Provider range covering whole days, end date included
fn to_provider_range(range: DateRange) -> Result<(OffsetDateTime, OffsetDateTime)> {
    let end_exclusive = range
        .end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| DataError::InvalidTimestamp(format!("day after {}", range.end)))?;

    let convert = |date: NaiveDate| {
        let seconds = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(seconds)
            .map_err(|e| DataError::InvalidTimestamp(format!("{date}: {e}")))
    };

    Ok((convert(range.start)?, convert(end_exclusive)?))
}

/// Combine per-ticker histories into one table
///
/// A ticker that failed or returned nothing becomes an all-absent column.
/// An all-absent table is `SourceError::Empty`, unless every ticker failed,
/// in which case the first failure is returned.
fn assemble_table(
    tickers: &[String],
    results: Vec<(String, Result<Vec<(NaiveDate, f64)>>)>,
) -> std::result::Result<PriceTable, SourceError> {
    let mut observations = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (ticker, result) in results {
        match result {
            Ok(history) if history.is_empty() => {
                warn!(ticker = %ticker, "No quotes in range");
            }
            Ok(history) => {
                debug!(ticker = %ticker, quotes = history.len(), "Fetched quote history");
                observations.push((ticker, history));
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Quote history unavailable");
                failures.push(e);
            }
        }
    }

    let table = PriceTable::from_observations(tickers, observations);
    if table.is_all_absent() {
        if failures.len() == tickers.len() {
            if let Some(first) = failures.into_iter().next() {
                return Err(first.into());
            }
        }
        return Err(SourceError::Empty {
            tickers: tickers.to_vec(),
        });
    }

    Ok(table)
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    async fn fetch_closes(
        &self,
        tickers: &[String],
        range: DateRange,
    ) -> std::result::Result<PriceTable, SourceError> {
        let requests = tickers.iter().map(|t| self.fetch_history(t, range));
        let results = futures::future::join_all(requests).await;

        assemble_table(tickers, tickers.iter().cloned().zip(results).collect())
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_range_includes_end_date() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        )
        .unwrap();

        let (start, end) = to_provider_range(range).unwrap();
        assert_eq!(start.unix_timestamp(), 1_735_776_000);
        assert_eq!(end.unix_timestamp() - start.unix_timestamp(), 9 * 86_400);
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn tickers(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_failed_ticker_becomes_absent_column() {
        let tickers = tickers(&["NEM", "AEM", "GOLD"]);
        let results = vec![
            ("NEM".to_string(), Ok(vec![(day(2), 40.0), (day(3), 41.0)])),
            (
                "AEM".to_string(),
                Err(DataError::DataUnavailable {
                    symbol: "AEM".to_string(),
                    reason: "No quotes returned".to_string(),
                }),
            ),
            ("GOLD".to_string(), Ok(Vec::new())),
        ];

        let table = assemble_table(&tickers, results).unwrap();

        assert_eq!(table.ticker_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value("NEM", 1), Some(41.0));
        assert!(table.column("AEM").unwrap().is_all_absent());
        assert!(table.column("GOLD").unwrap().is_all_absent());
    }

    #[test]
    fn test_no_quotes_is_empty() {
        let tickers = tickers(&["ETHE", "IBIT"]);
        let results = vec![
            ("ETHE".to_string(), Ok(Vec::new())),
            (
                "IBIT".to_string(),
                Err(DataError::YahooFinanceError("not found".to_string())),
            ),
        ];

        match assemble_table(&tickers, results) {
            Err(SourceError::Empty { tickers: empty }) => assert_eq!(empty, tickers),
            other => panic!("Expected Empty, got {other:?}"),
        }
    }

    #[test]
    fn test_every_ticker_failing_returns_first_error() {
        let tickers = tickers(&["MSTR", "COIN"]);
        let results = vec![
            (
                "MSTR".to_string(),
                Err(DataError::YahooFinanceError("connection reset".to_string())),
            ),
            (
                "COIN".to_string(),
                Err(DataError::YahooFinanceError("timeout".to_string())),
            ),
        ];

        match assemble_table(&tickers, results) {
            Err(SourceError::Provider(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            YahooPriceSource::new(0),
            Err(DataError::ConfigError(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_closes() {
        let source = YahooPriceSource::new(60).unwrap();
        let end = chrono::Utc::now().date_naive();
        let range = DateRange::trailing(end, 30).unwrap();
        let tickers = vec!["NEM".to_string(), "NOT_A_TICKER_12345".to_string()];

        let table = source.fetch_closes(&tickers, range).await.unwrap();
        assert_eq!(table.ticker_count(), 2);
        assert!(!table.is_empty());
        assert!(table.columns()[1].is_all_absent());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_basket_is_empty() {
        let source = YahooPriceSource::new(60).unwrap();
        let end = chrono::Utc::now().date_naive();
        let range = DateRange::trailing(end, 30).unwrap();
        let tickers = vec!["NOT_A_TICKER_12345".to_string()];

        assert!(source.fetch_closes(&tickers, range).await.is_err());
    }
}
