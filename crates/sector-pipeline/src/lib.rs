//! Sector index pipeline
//!
//! Runs fetch → clean → build for every configured sector, then ranks the
//! built indices. Sectors are independent: each is its own future and the
//! only synchronization point is the final join.
//!
//! A sector that cannot be fetched or has too little history is skipped and
//! recorded in the [`RunReport`]; it never aborts the others. The run fails
//! only when no sector produces an index.

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::{PipelineError, Result};
pub use pipeline::{SectorOutcome, SectorPipeline};
pub use report::{RunReport, SkipReason, SkippedSector};
