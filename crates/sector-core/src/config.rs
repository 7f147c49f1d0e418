//! Configuration for a dashboard run

use crate::cleaner::AnchorPolicy;
use crate::error::{IndexError, Result};
use crate::sector::{SectorDefinition, default_sectors};
use crate::summary::DEFAULT_WEEK_PERIODS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Price provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceConfig {
    /// Requests allowed per minute against the provider
    pub requests_per_minute: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 120,
        }
    }
}

/// Where artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub html_file: String,
    pub json_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docs"),
            html_file: "index.html".to_string(),
            json_file: "data.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn html_path(&self) -> PathBuf {
        self.dir.join(&self.html_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }
}

/// Complete configuration of a dashboard run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub title: String,
    pub subtitle: String,
    /// Calendar days of price history to request
    pub lookback_days: u32,
    /// Trailing observations used for the weekly return
    pub week_periods: usize,
    pub anchor: AnchorPolicy,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub sectors: Vec<SectorDefinition>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Sector Indices Dashboard".to_string(),
            subtitle: "Equal-weighted, normalized to 100 one year ago, updated daily".to_string(),
            lookback_days: 365,
            week_periods: DEFAULT_WEEK_PERIODS,
            anchor: AnchorPolicy::default(),
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            sectors: default_sectors(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = sector_utils::load_json(path)?;
        Ok(config)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| IndexError::InvalidConfig(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sectors.is_empty() {
            return Err(IndexError::InvalidConfig(
                "at least one sector must be configured".to_string(),
            ));
        }

        if self.lookback_days == 0 {
            return Err(IndexError::InvalidConfig(
                "lookbackDays must be greater than 0".to_string(),
            ));
        }

        if self.week_periods == 0 {
            return Err(IndexError::InvalidConfig(
                "weekPeriods must be greater than 0".to_string(),
            ));
        }

        if self.week_periods >= self.lookback_days as usize {
            return Err(IndexError::InvalidConfig(format!(
                "weekPeriods ({}) must be less than lookbackDays ({})",
                self.week_periods, self.lookback_days
            )));
        }

        if self.source.requests_per_minute == 0 {
            return Err(IndexError::InvalidConfig(
                "source.requestsPerMinute must be greater than 0".to_string(),
            ));
        }

        if self.output.html_file.trim().is_empty() || self.output.json_file.trim().is_empty() {
            return Err(IndexError::InvalidConfig(
                "output file names must not be blank".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for sector in &self.sectors {
            validate_sector(sector)?;
            if !names.insert(sector.name.as_str()) {
                return Err(IndexError::InvalidConfig(format!(
                    "duplicate sector name '{}'",
                    sector.name
                )));
            }
        }

        Ok(())
    }
}

fn validate_sector(sector: &SectorDefinition) -> Result<()> {
    if sector.name.trim().is_empty() {
        return Err(IndexError::InvalidConfig(
            "sector name must not be blank".to_string(),
        ));
    }

    if sector.tickers.is_empty() {
        return Err(IndexError::InvalidConfig(format!(
            "sector '{}' has no tickers",
            sector.name
        )));
    }

    let mut seen = HashSet::new();
    for ticker in &sector.tickers {
        if ticker.trim().is_empty() {
            return Err(IndexError::InvalidConfig(format!(
                "sector '{}' has a blank ticker",
                sector.name
            )));
        }
        if !seen.insert(ticker.as_str()) {
            return Err(IndexError::InvalidConfig(format!(
                "sector '{}' lists {} twice",
                sector.name, ticker
            )));
        }
    }

    if !is_hex_color(&sector.color) {
        return Err(IndexError::InvalidConfig(format!(
            "sector '{}' has invalid color '{}', expected #RGB or #RRGGBB",
            sector.name, sector.color
        )));
    }

    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
