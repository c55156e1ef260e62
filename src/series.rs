//! Footprint time series assembly.
//!
//! One `ThresholdSeries` per cutoff pass, sorted by time and written once as
//! `rFootvsTime_<label>.csv` in the case directory.

use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::decode::CutoffObservation;
use crate::error::{PipelineError, PipelineResult};

/// Column names of a series file. These match the serialized field names of
/// `CutoffObservation`.
pub const SERIES_HEADER: [&str; 2] = ["time", "rf"];

/// Observations for one cutoff, sorted ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSeries {
    cutoff: f64,
    observations: Vec<CutoffObservation>,
}

impl ThresholdSeries {
    /// Build a series; observations may arrive in any order.
    pub fn new(cutoff: f64, mut observations: Vec<CutoffObservation>) -> Self {
        observations.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            cutoff,
            observations,
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn observations(&self) -> &[CutoffObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Cutoff as it appears in file names.
///
/// Values below one keep four decimals (`0.0100`); larger values drop
/// trailing zeros and the decimal point (`2.5`, `3`).
pub fn cutoff_label(cutoff: f64) -> String {
    let fixed = format!("{:.4}", cutoff);
    if cutoff < 1.0 {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn series_file_name(cutoff: f64) -> String {
    format!("rFootvsTime_{}.csv", cutoff_label(cutoff))
}

/// Write `series` into `case_dir`, replacing any previous file.
///
/// The header is written even when the series is empty.
pub fn write_series(series: &ThresholdSeries, case_dir: &Path) -> PipelineResult<PathBuf> {
    let path = case_dir.join(series_file_name(series.cutoff()));
    let csv_err = |source: csv::Error| PipelineError::Csv {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(|source| PipelineError::Io {
        path: path.clone(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(SERIES_HEADER).map_err(csv_err)?;
    for obs in series.observations() {
        writer.serialize(obs).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| PipelineError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        cutoff = series.cutoff(),
        rows = series.len(),
        path = %path.display(),
        "Wrote {} rows",
        series.len()
    );
    Ok(path)
}
