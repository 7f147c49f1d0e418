//! Raw index data export
//!
//! The export maps each sector name to its dated index values:
//!
//! ```json
//! {
//!   "Gold Miners": {
//!     "2025-01-02": 100.0,
//!     "2025-01-03": 101.25
//!   }
//! }
//! ```

use crate::error::{RenderError, Result};
use chrono::NaiveDate;
use sector_core::{IndexPoint, IndexSeries, SectorIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Index values per sector, keyed by ISO date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDataExport {
    sectors: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RawDataExport {
    pub fn from_sectors(sectors: &[SectorIndex]) -> Self {
        let sectors = sectors
            .iter()
            .map(|sector| {
                let values = sector
                    .series
                    .points()
                    .iter()
                    .map(|p| (p.date.format(DATE_FORMAT).to_string(), p.value))
                    .collect();
                (sector.name.clone(), values)
            })
            .collect();

        Self { sectors }
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn sector_names(&self) -> impl Iterator<Item = &str> {
        self.sectors.keys().map(String::as_str)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously written export
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RenderError::MalformedExport(format!("invalid JSON: {e}")))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| RenderError::io(path, e))?;
        tracing::debug!(path = %path.display(), sectors = self.len(), "Wrote raw data export");
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Rebuild the index series, sorted by sector name
    pub fn into_series(self) -> Result<Vec<(String, IndexSeries)>> {
        self.sectors
            .into_iter()
            .map(|(name, values)| {
                let points = values
                    .into_iter()
                    .map(|(date, value)| {
                        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
                            RenderError::MalformedExport(format!("{name}: bad date '{date}': {e}"))
                        })?;
                        Ok(IndexPoint { date, value })
                    })
                    .collect::<Result<Vec<_>>>()?;

                let series = IndexSeries::new(points)
                    .map_err(|e| RenderError::MalformedExport(format!("{name}: {e}")))?;
                Ok((name, series))
            })
            .collect()
    }
}
