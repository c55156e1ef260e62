//! bpost Library
//!
//! Post-processing for axisymmetric drop-impact simulations: runs the
//! compiled snapshot extraction helpers, decodes their text output, and
//! assembles video frames or footprint time series.

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod helper;
pub mod interrupt;
pub mod pipeline;
pub mod render;
pub mod series;
pub mod snapshot;
pub mod worker;

pub use config::{Config, ConfigOverrides, DomainBounds, RuntimeConfig};
pub use error::{PipelineError, PipelineResult};
pub use helper::{HelperRunner, ProcessRunner};
pub use interrupt::Interrupt;
pub use render::PlotStyle;
pub use series::ThresholdSeries;
pub use snapshot::SnapshotIdentity;
pub use worker::WorkerPool;
