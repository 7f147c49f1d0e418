//! Daily close price tables
//!
//! A [`PriceTable`] holds one column per ticker over a shared, ascending date
//! axis. Cells are `None` where the provider had no close for that date.

use crate::error::{IndexError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Prices that can anchor or extend an index: finite and positive
pub(crate) fn is_usable_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Close prices of a single ticker aligned to the table's date axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerColumn {
    pub ticker: String,
    pub values: Vec<Option<f64>>,
}

impl TickerColumn {
    pub fn new(ticker: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            ticker: ticker.into(),
            values,
        }
    }

    /// Index of the first row holding a value
    pub fn first_observed(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// True when the ticker never reports a value
    pub fn is_all_absent(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// Table of daily close prices, one column per ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<TickerColumn>,
}

impl PriceTable {
    /// Build a table from a date axis and columns of matching length
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<TickerColumn>) -> Result<Self> {
        for column in &columns {
            if column.values.len() != dates.len() {
                return Err(IndexError::ShapeMismatch {
                    ticker: column.ticker.clone(),
                    expected: dates.len(),
                    actual: column.values.len(),
                });
            }
        }
        Ok(Self { dates, columns })
    }

    /// Table with the given tickers and no rows
    pub fn empty(tickers: &[String]) -> Self {
        Self {
            dates: Vec::new(),
            columns: tickers
                .iter()
                .map(|t| TickerColumn::new(t.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Align per-ticker observations onto the union of their dates
    ///
    /// Columns follow the order of `tickers`. Tickers missing from
    /// `observations` become all-absent columns. Non-finite and non-positive
    /// prices are dropped; a later duplicate date for the same ticker wins.
    pub fn from_observations(
        tickers: &[String],
        observations: impl IntoIterator<Item = (String, Vec<(NaiveDate, f64)>)>,
    ) -> Self {
        let mut by_ticker: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        let mut axis = BTreeSet::new();

        for (ticker, series) in observations {
            let entry = by_ticker.entry(ticker).or_default();
            for (date, price) in series {
                if is_usable_price(price) {
                    axis.insert(date);
                    entry.insert(date, price);
                }
            }
        }

        let dates: Vec<NaiveDate> = axis.into_iter().collect();
        let columns = tickers
            .iter()
            .map(|ticker| {
                let prices = by_ticker.get(ticker);
                let values = dates
                    .iter()
                    .map(|d| prices.and_then(|p| p.get(d).copied()))
                    .collect();
                TickerColumn::new(ticker.clone(), values)
            })
            .collect();

        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[TickerColumn] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn ticker_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column for a ticker symbol
    pub fn column(&self, ticker: &str) -> Option<&TickerColumn> {
        self.columns.iter().find(|c| c.ticker == ticker)
    }

    /// Value of a ticker at a row, `None` when absent or out of range
    pub fn value(&self, ticker: &str, row: usize) -> Option<f64> {
        self.column(ticker)
            .and_then(|c| c.values.get(row).copied().flatten())
    }

    /// True when no cell in the table holds a value
    pub fn is_all_absent(&self) -> bool {
        self.columns.iter().all(TickerColumn::is_all_absent)
    }

    /// True when the row has no value in any column
    pub(crate) fn row_is_absent(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c.values[row].is_none())
    }

    /// Same date axis with each column replaced by `f`
    ///
    /// `f` must keep the column length.
    pub(crate) fn map_columns(&self, f: impl FnMut(&TickerColumn) -> TickerColumn) -> Self {
        let columns: Vec<TickerColumn> = self.columns.iter().map(f).collect();
        debug_assert!(columns.iter().all(|c| c.values.len() == self.dates.len()));
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<NaiveDate>, Vec<TickerColumn>) {
        (self.dates, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PriceTable::new(
            vec![day(3), day(4)],
            vec![TickerColumn::new("NEM", vec![Some(1.0)])],
        )
        .unwrap_err();

        assert!(matches!(err, IndexError::ShapeMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_from_observations_aligns_dates() {
        let tickers = vec!["NEM".to_string(), "AEM".to_string(), "GOLD".to_string()];
        let table = PriceTable::from_observations(
            &tickers,
            vec![
                ("AEM".to_string(), vec![(day(4), 80.0), (day(5), 81.0)]),
                ("NEM".to_string(), vec![(day(3), 40.0), (day(5), 42.0)]),
            ],
        );

        assert_eq!(table.dates(), &[day(3), day(4), day(5)]);
        assert_eq!(table.ticker_count(), 3);
        assert_eq!(table.columns()[0].ticker, "NEM");
        assert_eq!(table.columns()[0].values, vec![Some(40.0), None, Some(42.0)]);
        assert_eq!(table.columns()[1].values, vec![None, Some(80.0), Some(81.0)]);
        assert!(table.columns()[2].is_all_absent());
    }

    #[test]
    fn test_from_observations_drops_bad_prices() {
        let tickers = vec!["MSTR".to_string()];
        let table = PriceTable::from_observations(
            &tickers,
            vec![(
                "MSTR".to_string(),
                vec![(day(3), f64::NAN), (day(4), 0.0), (day(5), 300.0)],
            )],
        );

        assert_eq!(table.dates(), &[day(5)]);
        assert_eq!(table.value("MSTR", 0), Some(300.0));
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::empty(&["COIN".to_string()]);
        assert!(table.is_empty());
        assert!(table.is_all_absent());
        assert_eq!(table.ticker_count(), 1);
    }
}
