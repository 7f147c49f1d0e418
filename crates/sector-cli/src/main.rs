//! Command-line interface for sector-indices

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use sector_core::DashboardConfig;
use sector_data::YahooPriceSource;
use sector_pipeline::{RunReport, SectorPipeline};
use sector_render::{ArtifactWriter, DashboardView, console};
use sector_utils::LogFormat;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sector-dashboard")]
#[command(about = "Build equal-weighted sector indices and render a dashboard", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for index.html and data.json
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Calendar days of history to fetch
    #[arg(long)]
    lookback_days: Option<u32>,

    /// Print summaries as tables
    #[arg(long)]
    table: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Print summaries without writing artifacts
    #[arg(long)]
    no_write: bool,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => DashboardConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output.dir.clone_from(dir);
        }
        if let Some(days) = self.lookback_days {
            config.lookback_days = days;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn print_summary(report: &RunReport, as_table: bool) {
    for summary in [&report.one_year, &report.one_week] {
        if as_table {
            println!("{}", console::summary_table(summary));
        } else {
            println!("{}", console::summary_block(summary));
        }
        println!();
    }

    if !report.skipped.is_empty() {
        println!("Skipped:");
        for skip in &report.skipped {
            println!("  {}: {}", skip.sector_name, skip.reason);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    sector_utils::init_tracing_with(format, "info");

    info!("Starting sector-dashboard");

    let config = args.load_config()?;
    let source = YahooPriceSource::new(config.source.requests_per_minute)
        .context("Failed to create Yahoo Finance source")?;
    let pipeline = SectorPipeline::new(Arc::new(source), &config)?;

    let end = args.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let report = pipeline.run(end).await?;

    print_summary(&report, args.table);

    if args.no_write {
        return Ok(());
    }

    let skipped: Vec<String> = report
        .skipped
        .iter()
        .map(|s| format!("{}: {}", s.sector_name, s.reason))
        .collect();
    let view = DashboardView {
        title: &config.title,
        subtitle: &config.subtitle,
        start: report.range.start,
        end: report.range.end,
        sectors: &report.sectors,
        one_year: &report.one_year,
        one_week: &report.one_week,
        skipped: &skipped,
    };

    let written = ArtifactWriter::new(config.output.clone())?.write(&view)?;
    println!("Saved {} and {}", written.html.display(), written.json.display());

    Ok(())
}
