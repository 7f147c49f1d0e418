//! Per-sector fetch, clean and build

use crate::error::{PipelineError, Result};
use crate::report::{RunReport, SkipReason, SkippedSector};
use chrono::NaiveDate;
use sector_core::{
    DashboardConfig, DateRange, IndexBuilder, IndexError, PriceSource, ReturnSummarizer,
    ReturnWindow, SectorDefinition, SectorIndex, SeriesCleaner, SourceError,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of processing one sector
#[derive(Debug, Clone)]
pub enum SectorOutcome {
    Built(SectorIndex),
    Skipped(SkippedSector),
}

/// Builds sector indices from a price source
pub struct SectorPipeline {
    source: Arc<dyn PriceSource>,
    sectors: Vec<SectorDefinition>,
    lookback_days: u32,
    cleaner: SeriesCleaner,
    builder: IndexBuilder,
    summarizer: ReturnSummarizer,
}

impl SectorPipeline {
    /// Create a pipeline for a validated configuration
    pub fn new(source: Arc<dyn PriceSource>, config: &DashboardConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            sectors: config.sectors.clone(),
            lookback_days: config.lookback_days,
            cleaner: SeriesCleaner::new(config.anchor),
            builder: IndexBuilder::new(),
            summarizer: ReturnSummarizer::new(config.week_periods),
        })
    }

    /// Fetch, clean and build one sector
    pub async fn build_sector(&self, sector: &SectorDefinition, range: DateRange) -> SectorOutcome {
        info!(sector = %sector.name, tickers = sector.tickers.len(), source = self.source.name(), "Fetching sector");

        let skip = |reason: SkipReason| {
            warn!(sector = %sector.name, %reason, "Skipping sector");
            SectorOutcome::Skipped(SkippedSector {
                sector_name: sector.name.clone(),
                reason,
            })
        };

        let table = match self.source.fetch_closes(&sector.tickers, range).await {
            Ok(table) => table,
            Err(SourceError::Empty { .. }) => return skip(SkipReason::FetchEmpty),
            Err(e) => {
                return skip(SkipReason::FetchFailed {
                    message: e.to_string(),
                });
            }
        };

        if table.is_empty() || table.is_all_absent() {
            return skip(SkipReason::FetchEmpty);
        }

        let cleaned = match self.cleaner.clean(table) {
            Ok(cleaned) => cleaned,
            Err(IndexError::EmptyTable) => return skip(SkipReason::FetchEmpty),
            Err(IndexError::InsufficientHistory { rows, .. }) => {
                return skip(SkipReason::InsufficientHistory { rows });
            }
            Err(e) => {
                return skip(SkipReason::InvalidData {
                    message: e.to_string(),
                });
            }
        };

        let series = self.builder.build(&cleaned);
        info!(
            sector = %sector.name,
            rows = series.len(),
            last = series.last().value,
            "Built sector index"
        );

        SectorOutcome::Built(SectorIndex::new(&sector.name, &sector.color, series))
    }

    /// Run every sector over the lookback window ending at `end`
    ///
    /// Sectors run concurrently; the report keeps configuration order.
    pub async fn run(&self, end: NaiveDate) -> Result<RunReport> {
        let range = DateRange::trailing(end, self.lookback_days)
            .map_err(|e| PipelineError::InvalidRange(e.to_string()))?;

        let tasks = self.sectors.iter().map(|s| self.build_sector(s, range));
        let outcomes = futures::future::join_all(tasks).await;

        let mut sectors = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                SectorOutcome::Built(index) => sectors.push(index),
                SectorOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        if sectors.is_empty() {
            return Err(PipelineError::AllSectorsFailed {
                attempted: skipped.len(),
            });
        }

        let one_year = self.summarizer.summarize(&sectors, ReturnWindow::OneYear);
        let one_week = self.summarizer.summarize(&sectors, ReturnWindow::OneWeek);

        info!(
            built = sectors.len(),
            skipped = skipped.len(),
            "Pipeline run complete"
        );

        Ok(RunReport {
            range,
            sectors,
            skipped,
            one_year,
            one_week,
        })
    }
}
