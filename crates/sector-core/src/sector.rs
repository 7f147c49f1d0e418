//! Sector definitions and built sector indices

use crate::index::IndexSeries;
use serde::{Deserialize, Serialize};

/// A named basket of tickers plotted in one color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorDefinition {
    pub name: String,
    pub tickers: Vec<String>,
    pub color: String,
}

impl SectorDefinition {
    pub fn new<I, S>(name: impl Into<String>, tickers: I, color: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tickers: tickers.into_iter().map(Into::into).collect(),
            color: color.into(),
        }
    }
}

/// Index series built for one sector during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorIndex {
    pub name: String,
    pub color: String,
    pub series: IndexSeries,
}

impl SectorIndex {
    pub fn new(name: impl Into<String>, color: impl Into<String>, series: IndexSeries) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            series,
        }
    }
}

/// The five baskets the dashboard ships with
pub fn default_sectors() -> Vec<SectorDefinition> {
    vec![
        SectorDefinition::new(
            "Gold Miners",
            ["NEM", "AEM", "GOLD", "KGC", "AU", "SSRM", "FNV", "WPM", "RGLD", "AGI"],
            "#FFD700",
        ),
        SectorDefinition::new(
            "Crypto Stocks",
            ["MSTR", "STRK", "COIN", "MARA", "RIOT", "ETHE", "IBIT"],
            "#F7931A",
        ),
        SectorDefinition::new(
            "AI & Semis",
            ["NVDA", "MU", "GOOG", "AVGO", "TSM", "TSLA"],
            "#76b900",
        ),
        SectorDefinition::new("Oil & Gas Small Cap", ["NOG", "MUR", "WHD"], "#000000"),
        SectorDefinition::new(
            "Foreign Nat Resources & Steel",
            ["VALE", "SQM", "GGB", "TTE", "SCCO"],
            "#c41e3a",
        ),
    ]
}
