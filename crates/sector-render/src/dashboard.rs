//! HTML dashboard document

use crate::chart::{self, ChartPanel, PANEL_HEIGHT};
use crate::error::Result;
use chrono::NaiveDate;
use minijinja::Environment;
use sector_core::{PerformanceSummary, SectorIndex};
use serde::Serialize;

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Inputs for one dashboard document
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sectors: &'a [SectorIndex],
    pub one_year: &'a PerformanceSummary,
    pub one_week: &'a PerformanceSummary,
    /// Human readable notes about sectors left out of the run
    pub skipped: &'a [String],
}

#[derive(Debug, Serialize)]
struct RankRow {
    rank: usize,
    name: String,
    change: String,
    positive: bool,
    final_value: Option<String>,
}

#[derive(Debug, Serialize)]
struct RankTable {
    heading: String,
    rows: Vec<RankRow>,
    omitted: Vec<String>,
}

impl From<&PerformanceSummary> for RankTable {
    fn from(summary: &PerformanceSummary) -> Self {
        Self {
            heading: format!("{} Performance", summary.window),
            rows: summary
                .ranked
                .iter()
                .enumerate()
                .map(|(i, record)| RankRow {
                    rank: i + 1,
                    name: record.sector_name.clone(),
                    change: record.display_return(),
                    positive: record.return_pct >= 0.0,
                    final_value: record.display_final_value(),
                })
                .collect(),
            omitted: summary
                .omitted
                .iter()
                .map(|o| o.sector_name.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DashboardContext<'a> {
    title: &'a str,
    subtitle: &'a str,
    start_date: String,
    end_date: String,
    figure_height: u32,
    panel_height: u32,
    panels: Vec<ChartPanel>,
    rankings: Vec<RankTable>,
    skipped: &'a [String],
}

/// Renders the stacked-panel dashboard
pub struct DashboardRenderer {
    env: Environment<'static>,
}

impl DashboardRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render a complete, self-contained HTML document
    pub fn render(&self, view: &DashboardView<'_>) -> Result<String> {
        let panels: Vec<ChartPanel> = view.sectors.iter().map(chart::panel).collect();

        let context = DashboardContext {
            title: view.title,
            subtitle: view.subtitle,
            start_date: view.start.to_string(),
            end_date: view.end.to_string(),
            figure_height: chart::figure_height(panels.len()) as u32,
            panel_height: PANEL_HEIGHT as u32,
            panels,
            rankings: vec![RankTable::from(view.one_year), RankTable::from(view.one_week)],
            skipped: view.skipped,
        };

        let html = self.env.get_template(TEMPLATE_NAME)?.render(&context)?;
        tracing::debug!(bytes = html.len(), panels = view.sectors.len(), "Rendered dashboard");
        Ok(html)
    }
}
