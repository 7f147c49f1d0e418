//! Trailing returns and sector ranking

use crate::error::{IndexError, Result};
use crate::index::{BASE_VALUE, IndexSeries};
use crate::sector::SectorIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of trailing observations for the weekly return
pub const DEFAULT_WEEK_PERIODS: usize = 5;

/// Window a return is measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReturnWindow {
    /// Whole lookback window, measured from the base value
    OneYear,
    /// Trailing trading observations
    OneWeek,
}

impl ReturnWindow {
    pub fn label(&self) -> &'static str {
        match self {
            ReturnWindow::OneYear => "1-Year",
            ReturnWindow::OneWeek => "1-Week",
        }
    }
}

impl fmt::Display for ReturnWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Return of one sector over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub sector_name: String,
    /// Percentage return, e.g. `3.96` for +3.96%
    pub return_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_value: Option<f64>,
}

impl PerformanceRecord {
    /// Signed return with two decimals, e.g. `+3.96%`
    pub fn display_return(&self) -> String {
        format_return(self.return_pct)
    }

    /// Final index value with one decimal
    pub fn display_final_value(&self) -> Option<String> {
        self.final_value.map(|v| format!("{v:.1}"))
    }
}

/// Format a percentage as a signed two-decimal string
pub fn format_return(pct: f64) -> String {
    format!("{pct:+.2}%")
}

/// Sector left out of a summary because its series is too short
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmittedSector {
    pub sector_name: String,
    pub observations: usize,
    pub required: usize,
}

/// Ranked returns for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub window: ReturnWindow,
    /// Records sorted by `return_pct`, highest first
    pub ranked: Vec<PerformanceRecord>,
    pub omitted: Vec<OmittedSector>,
}

impl PerformanceSummary {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn leader(&self) -> Option<&PerformanceRecord> {
        self.ranked.first()
    }
}

/// Total return since the base value
pub fn one_year_return(series: &IndexSeries) -> f64 {
    (series.last().value / BASE_VALUE - 1.0) * 100.0
}

/// Return of the last value against the value `periods` observations earlier
pub fn trailing_return(series: &IndexSeries, periods: usize) -> Result<f64> {
    let earlier = series.back(periods).ok_or(IndexError::InsufficientWindow {
        window: ReturnWindow::OneWeek,
        observations: series.len(),
        required: periods.saturating_add(1),
    })?;
    Ok((series.last().value / earlier.value - 1.0) * 100.0)
}

/// Sort records by return, highest first, keeping insertion order on ties
pub fn rank(records: &mut [PerformanceRecord]) {
    records.sort_by(|a, b| b.return_pct.total_cmp(&a.return_pct));
}

/// Computes ranked return summaries over built sector indices
#[derive(Debug, Clone, Copy)]
pub struct ReturnSummarizer {
    week_periods: usize,
}

impl Default for ReturnSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_WEEK_PERIODS)
    }
}

impl ReturnSummarizer {
    pub fn new(week_periods: usize) -> Self {
        Self { week_periods }
    }

    /// Observations needed for a window
    pub fn required_observations(&self, window: ReturnWindow) -> usize {
        match window {
            ReturnWindow::OneYear => crate::cleaner::MIN_HISTORY_ROWS,
            ReturnWindow::OneWeek => self.week_periods.saturating_add(1),
        }
    }

    /// Return record for one sector, `None` when its series is too short
    pub fn record(&self, sector: &SectorIndex, window: ReturnWindow) -> Option<PerformanceRecord> {
        if sector.series.len() < self.required_observations(window) {
            return None;
        }

        let (return_pct, final_value) = match window {
            ReturnWindow::OneYear => (
                one_year_return(&sector.series),
                Some(sector.series.last().value),
            ),
            ReturnWindow::OneWeek => (trailing_return(&sector.series, self.week_periods).ok()?, None),
        };

        Some(PerformanceRecord {
            sector_name: sector.name.clone(),
            return_pct,
            final_value,
        })
    }

    /// Ranked summary of every sector for a window
    pub fn summarize(&self, sectors: &[SectorIndex], window: ReturnWindow) -> PerformanceSummary {
        let required = self.required_observations(window);
        let mut ranked = Vec::with_capacity(sectors.len());
        let mut omitted = Vec::new();

        for sector in sectors {
            match self.record(sector, window) {
                Some(record) => ranked.push(record),
                None => {
                    tracing::info!(
                        sector = %sector.name,
                        observations = sector.series.len(),
                        required,
                        "Omitting sector from {} summary",
                        window
                    );
                    omitted.push(OmittedSector {
                        sector_name: sector.name.clone(),
                        observations: sector.series.len(),
                        required,
                    });
                }
            }
        }

        rank(&mut ranked);
        PerformanceSummary {
            window,
            ranked,
            omitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexPoint;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> IndexSeries {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        IndexSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| IndexPoint {
                    date: start + chrono::Days::new(i as u64),
                    value,
                })
                .collect(),
        )
        .unwrap()
    }

    fn sector(name: &str, values: &[f64]) -> SectorIndex {
        SectorIndex::new(name, "#FFD700", series(values))
    }

    fn record(name: &str, pct: f64) -> PerformanceRecord {
        PerformanceRecord {
            sector_name: name.to_string(),
            return_pct: pct,
            final_value: None,
        }
    }

    #[test]
    fn test_one_year_return() {
        let s = series(&[100.0, 90.0, 112.5]);
        assert!((one_year_return(&s) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_week_return_example() {
        let s = series(&[100.0, 101.0, 99.0, 102.0, 103.0, 104.0, 105.0]);
        let pct = trailing_return(&s, 5).unwrap();

        assert!((pct - (105.0 / 101.0 - 1.0) * 100.0).abs() < 1e-12);
        assert_eq!(format_return(pct), "+3.96%");
    }

    #[test]
    fn test_trailing_return_needs_history() {
        let s = series(&[100.0, 101.0, 99.0, 102.0, 103.0]);
        let err = trailing_return(&s, 5).unwrap_err();
        assert!(matches!(
            err,
            IndexError::InsufficientWindow {
                observations: 5,
                required: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_huge_week_periods_omits_instead_of_overflowing() {
        let summarizer = ReturnSummarizer::new(usize::MAX);
        assert_eq!(summarizer.required_observations(ReturnWindow::OneWeek), usize::MAX);

        let sectors = vec![SectorIndex::new(
            "Gold Miners",
            "#FFD700",
            series(&[100.0, 101.0, 99.0, 102.0, 103.0, 104.0]),
        )];
        let summary = summarizer.summarize(&sectors, ReturnWindow::OneWeek);
        assert!(summary.ranked.is_empty());
        assert_eq!(summary.omitted.len(), 1);
        assert!(trailing_return(&sectors[0].series, usize::MAX).is_err());
    }

    #[test]
    fn test_rank_descending() {
        let mut records = vec![record("A", 5.0), record("B", 10.0), record("C", -2.0)];
        rank(&mut records);

        let order: Vec<&str> = records.iter().map(|r| r.sector_name.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let mut records = vec![record("X", 1.0), record("Y", 3.0), record("Z", 1.0)];
        rank(&mut records);

        let order: Vec<&str> = records.iter().map(|r| r.sector_name.as_str()).collect();
        assert_eq!(order, vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_rank_is_numeric_not_lexical() {
        // "+9.00%" sorts above "+10.00%" as text
        let mut records = vec![record("Nine", 9.0), record("Ten", 10.0)];
        rank(&mut records);
        assert_eq!(records[0].sector_name, "Ten");
    }

    #[test]
    fn test_summarize_one_year() {
        let sectors = vec![
            sector("Gold Miners", &[100.0, 105.0]),
            sector("AI & Semis", &[100.0, 110.0]),
            sector("Oil & Gas Small Cap", &[100.0, 98.0]),
        ];

        let summary = ReturnSummarizer::default().summarize(&sectors, ReturnWindow::OneYear);

        assert_eq!(summary.window, ReturnWindow::OneYear);
        assert!(summary.omitted.is_empty());
        let names: Vec<&str> = summary.ranked.iter().map(|r| r.sector_name.as_str()).collect();
        assert_eq!(names, vec!["AI & Semis", "Gold Miners", "Oil & Gas Small Cap"]);
        assert_eq!(summary.ranked[0].display_return(), "+10.00%");
        assert_eq!(summary.ranked[0].display_final_value().as_deref(), Some("110.0"));
        assert_eq!(summary.ranked[2].display_return(), "-2.00%");
    }

    #[test]
    fn test_summarize_one_week_omits_short_series() {
        let sectors = vec![
            sector("Crypto Stocks", &[100.0, 101.0, 99.0, 102.0, 103.0, 104.0, 105.0]),
            sector("Gold Miners", &[100.0, 101.0, 102.0, 103.0]),
        ];

        let summary = ReturnSummarizer::default().summarize(&sectors, ReturnWindow::OneWeek);

        assert_eq!(summary.ranked.len(), 1);
        assert_eq!(summary.ranked[0].sector_name, "Crypto Stocks");
        assert_eq!(summary.ranked[0].final_value, None);
        assert_eq!(
            summary.omitted,
            vec![OmittedSector {
                sector_name: "Gold Miners".to_string(),
                observations: 4,
                required: 6,
            }]
        );
    }

    #[test]
    fn test_summarize_nothing() {
        let summary = ReturnSummarizer::default().summarize(&[], ReturnWindow::OneYear);
        assert!(summary.is_empty());
        assert!(summary.leader().is_none());
    }
}
