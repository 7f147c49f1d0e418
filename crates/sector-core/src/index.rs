//! Equal-weighted, base-100 sector index construction

use crate::cleaner::CleanedPriceTable;
use crate::error::{IndexError, Result};
use crate::table::{PriceTable, TickerColumn};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value every component and index starts from
pub const BASE_VALUE: f64 = 100.0;

/// One dated index value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered, non-empty sequence of index values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IndexPoint>", into = "Vec<IndexPoint>")]
pub struct IndexSeries {
    points: Vec<IndexPoint>,
}

impl IndexSeries {
    pub fn new(points: Vec<IndexPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(IndexError::EmptyTable);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[IndexPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> IndexPoint {
        self.points[0]
    }

    pub fn last(&self) -> IndexPoint {
        self.points[self.points.len() - 1]
    }

    /// Point `periods` observations before the last one
    pub fn back(&self, periods: usize) -> Option<IndexPoint> {
        self.points
            .len()
            .checked_sub(periods.checked_add(1)?)
            .map(|i| self.points[i])
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Smallest and largest value
    pub fn extent(&self) -> (f64, f64) {
        self.values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}

impl TryFrom<Vec<IndexPoint>> for IndexSeries {
    type Error = IndexError;

    fn try_from(points: Vec<IndexPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<IndexSeries> for Vec<IndexPoint> {
    fn from(series: IndexSeries) -> Self {
        series.points
    }
}

/// Builds a sector index from a cleaned price table
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexBuilder;

impl IndexBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Rescale every column so its first observed value is [`BASE_VALUE`]
    ///
    /// Cells before a ticker's first observation stay absent.
    pub fn normalize(&self, table: &CleanedPriceTable) -> PriceTable {
        table.map_columns(|column| {
            let anchor = column.values.iter().flatten().next().copied();
            let values = column
                .values
                .iter()
                .map(|v| match (v, anchor) {
                    (Some(v), Some(anchor)) => Some(v / anchor * BASE_VALUE),
                    _ => None,
                })
                .collect();
            TickerColumn::new(column.ticker.clone(), values)
        })
    }

    /// Average the normalized columns row by row
    ///
    /// Absent cells are left out of a row's mean rather than counted as zero.
    pub fn build(&self, table: &CleanedPriceTable) -> IndexSeries {
        let normalized = self.normalize(table);

        let points = normalized
            .dates()
            .iter()
            .enumerate()
            .map(|(row, &date)| {
                let (sum, count) = normalized
                    .columns()
                    .iter()
                    .filter_map(|c| c.values[row])
                    .fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
                IndexPoint {
                    date,
                    value: sum / count as f64,
                }
            })
            .collect();

        IndexSeries { points }
    }
}
