//! Per-mode orchestration over the worker pool.
//!
//! - `video`: one frame per snapshot, fail-fast
//! - `footprint`: one series per cutoff, failures become gaps

pub mod footprint;
pub mod video;

pub use footprint::{FootprintOutcome, SeriesReport};
pub use video::{FrameOutcome, RenderSummary};
