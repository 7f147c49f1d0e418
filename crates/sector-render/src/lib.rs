//! Rendering for sector indices
//!
//! - [`DashboardRenderer`]: self-contained HTML dashboard with one SVG line
//!   panel per sector and the 1-year / 1-week rank tables overlaid
//! - [`RawDataExport`]: sector → date → value JSON, readable back into
//!   index series
//! - [`console`]: ranked summary lines and tables for the terminal
//! - [`ArtifactWriter`]: writes the dashboard and export into the output
//!   directory

pub mod chart;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod writer;

pub use dashboard::{DashboardRenderer, DashboardView};
pub use error::{RenderError, Result};
pub use export::RawDataExport;
pub use writer::{ArtifactWriter, WrittenArtifacts};
