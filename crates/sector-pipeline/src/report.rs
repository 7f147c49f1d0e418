//! Outcome of a pipeline run

use sector_core::{DateRange, PerformanceSummary, SectorIndex};
use serde::Serialize;
use std::fmt;

/// Why a sector produced no index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkipReason {
    /// The source had no prices for any ticker
    FetchEmpty,
    /// The source failed for this sector
    FetchFailed { message: String },
    /// Fewer rows than a return needs survived cleaning
    InsufficientHistory { rows: usize },
    /// The fetched table could not be processed
    InvalidData { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FetchEmpty => write!(f, "no price data"),
            SkipReason::FetchFailed { message } => write!(f, "fetch failed: {message}"),
            SkipReason::InsufficientHistory { rows } => {
                write!(f, "insufficient history ({rows} row(s))")
            }
            SkipReason::InvalidData { message } => write!(f, "invalid data: {message}"),
        }
    }
}

/// A configured sector left out of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSector {
    pub sector_name: String,
    pub reason: SkipReason,
}

/// Everything a renderer needs from one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub range: DateRange,
    /// Built sectors in configuration order
    pub sectors: Vec<SectorIndex>,
    pub skipped: Vec<SkippedSector>,
    pub one_year: PerformanceSummary,
    pub one_week: PerformanceSummary,
}

impl RunReport {
    /// Number of sectors the run attempted
    pub fn attempted(&self) -> usize {
        self.sectors.len() + self.skipped.len()
    }

    pub fn sector(&self, name: &str) -> Option<&SectorIndex> {
        self.sectors.iter().find(|s| s.name == name)
    }
}
