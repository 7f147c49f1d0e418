//! Sector index computation
//!
//! This crate turns daily close prices for a basket of tickers into one
//! equal-weighted sector index and summarizes how sectors performed:
//!
//! - [`SeriesCleaner`]: forward-fills each ticker and drops empty rows
//! - [`IndexBuilder`]: rescales every ticker to 100 at its first observation
//!   and averages them row by row
//! - [`ReturnSummarizer`]: 1-year and 1-week returns, ranked highest first
//!
//! Fetching prices is behind the [`PriceSource`] trait so the computation
//! stays independent of any market data provider.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sector_core::{IndexBuilder, PriceTable, ReturnSummarizer, ReturnWindow, SectorIndex, SeriesCleaner};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
//! let tickers = vec!["NEM".to_string(), "AEM".to_string()];
//! let table = PriceTable::from_observations(
//!     &tickers,
//!     vec![
//!         ("NEM".to_string(), vec![(day(2), 40.0), (day(3), 44.0)]),
//!         ("AEM".to_string(), vec![(day(2), 80.0), (day(3), 84.0)]),
//!     ],
//! );
//!
//! let cleaned = SeriesCleaner::default().clean(table)?;
//! let series = IndexBuilder::new().build(&cleaned);
//! let sectors = vec![SectorIndex::new("Gold Miners", "#FFD700", series)];
//!
//! let summary = ReturnSummarizer::default().summarize(&sectors, ReturnWindow::OneYear);
//! assert_eq!(summary.ranked[0].display_return(), "+7.50%");
//! # Ok::<(), sector_core::IndexError>(())
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod index;
pub mod sector;
pub mod source;
pub mod summary;
pub mod table;

pub use cleaner::{AnchorPolicy, CleanedPriceTable, MIN_HISTORY_ROWS, SeriesCleaner};
pub use config::{DashboardConfig, OutputConfig, SourceConfig};
pub use error::{IndexError, Result};
pub use index::{BASE_VALUE, IndexBuilder, IndexPoint, IndexSeries};
pub use sector::{SectorDefinition, SectorIndex, default_sectors};
pub use source::{DateRange, PriceSource, SourceError};
pub use summary::{
    OmittedSector, PerformanceRecord, PerformanceSummary, ReturnSummarizer, ReturnWindow,
};
pub use table::{PriceTable, TickerColumn};
