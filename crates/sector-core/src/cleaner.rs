//! Forward-fill cleaning of price tables

use crate::error::{IndexError, Result};
use crate::table::{PriceTable, TickerColumn, is_usable_price};
use serde::{Deserialize, Serialize};

/// Minimum number of rows a cleaned table needs to support a return
pub const MIN_HISTORY_ROWS: usize = 2;

/// How tickers with different first-available dates are anchored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorPolicy {
    /// Each ticker is anchored at its own first observation and joins the
    /// row mean from that row on
    #[default]
    FirstObservation,
    /// Leading rows are trimmed until every reporting ticker has a value
    CommonStart,
}

/// Price table after forward-fill and empty-row removal
///
/// No row is entirely absent and there are at least [`MIN_HISTORY_ROWS`] rows.
/// A ticker stays absent only before its first observation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedPriceTable(PriceTable);

impl CleanedPriceTable {
    pub fn table(&self) -> &PriceTable {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.row_count()
    }

    pub fn into_inner(self) -> PriceTable {
        self.0
    }
}

impl std::ops::Deref for CleanedPriceTable {
    type Target = PriceTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Forward-fills each column and drops rows with no values
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesCleaner {
    anchor: AnchorPolicy,
}

impl SeriesCleaner {
    pub fn new(anchor: AnchorPolicy) -> Self {
        Self { anchor }
    }

    /// Clean a table, failing when fewer than two rows remain
    ///
    /// Non-finite and non-positive prices count as absent before filling.
    pub fn clean(&self, table: PriceTable) -> Result<CleanedPriceTable> {
        if table.is_empty() {
            return Err(IndexError::EmptyTable);
        }

        let (dates, columns) = table.into_parts();
        let columns: Vec<TickerColumn> = columns
            .into_iter()
            .map(|c| {
                let usable: Vec<Option<f64>> = c
                    .values
                    .iter()
                    .map(|v| v.filter(|&p| is_usable_price(p)))
                    .collect();
                TickerColumn::new(c.ticker, forward_fill(&usable))
            })
            .collect();
        let filled = PriceTable::new(dates, columns)?;

        let (dates, mut columns) = filled.into_parts();
        let mut keep: Vec<bool> = (0..dates.len())
            .map(|row| columns.iter().any(|c| c.values[row].is_some()))
            .collect();

        if self.anchor == AnchorPolicy::CommonStart {
            columns.retain(|c| !c.is_all_absent());
            // Forward-filled columns stay present once observed, so the
            // latest first observation is where every ticker is available.
            let common_start = columns
                .iter()
                .filter_map(TickerColumn::first_observed)
                .max()
                .unwrap_or(0);
            for flag in keep.iter_mut().take(common_start) {
                *flag = false;
            }
        }

        let rows: Vec<usize> = (0..dates.len()).filter(|&r| keep[r]).collect();
        if rows.len() < MIN_HISTORY_ROWS {
            return Err(IndexError::InsufficientHistory {
                rows: rows.len(),
                required: MIN_HISTORY_ROWS,
            });
        }

        let dates = rows.iter().map(|&r| dates[r]).collect();
        let columns = columns
            .into_iter()
            .map(|c| {
                let values = rows.iter().map(|&r| c.values[r]).collect();
                TickerColumn::new(c.ticker, values)
            })
            .collect();

        let cleaned = PriceTable::new(dates, columns)?;
        debug_assert!((0..cleaned.row_count()).all(|r| !cleaned.row_is_absent(r)));
        tracing::debug!(
            rows = cleaned.row_count(),
            tickers = cleaned.ticker_count(),
            "Cleaned price table"
        );
        Ok(CleanedPriceTable(cleaned))
    }
}

/// Carry the last known value into following gaps
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}
