//! Writes dashboard artifacts to disk

use crate::dashboard::{DashboardRenderer, DashboardView};
use crate::error::{RenderError, Result};
use crate::export::RawDataExport;
use sector_core::OutputConfig;
use std::path::PathBuf;
use tracing::info;

/// Paths of the files produced by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub html: PathBuf,
    pub json: PathBuf,
}

/// Renders and writes the HTML dashboard and the raw data export
pub struct ArtifactWriter {
    output: OutputConfig,
    renderer: DashboardRenderer,
}

impl ArtifactWriter {
    pub fn new(output: OutputConfig) -> Result<Self> {
        Ok(Self {
            output,
            renderer: DashboardRenderer::new()?,
        })
    }

    /// Write both artifacts, creating the output directory if needed
    pub fn write(&self, view: &DashboardView<'_>) -> Result<WrittenArtifacts> {
        std::fs::create_dir_all(&self.output.dir)
            .map_err(|e| RenderError::io(&self.output.dir, e))?;

        let html = self.renderer.render(view)?;
        let html_path = self.output.html_path();
        std::fs::write(&html_path, html).map_err(|e| RenderError::io(&html_path, e))?;

        let json_path = self.output.json_path();
        RawDataExport::from_sectors(view.sectors).write(&json_path)?;

        info!(
            html = %html_path.display(),
            json = %json_path.display(),
            "Saved dashboard artifacts"
        );

        Ok(WrittenArtifacts {
            html: html_path,
            json: json_path,
        })
    }
}
