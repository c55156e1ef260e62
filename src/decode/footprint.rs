//! Footprint observation decoding.
//!
//! The footprint helper may print intermediate diagnostics; only the last
//! line matters and it has the form `time,value`. No output at all means the
//! interface has not reached the cutoff radius yet.

use serde::Serialize;

use super::parse_number;
use crate::error::{PipelineError, PipelineResult};

/// One `(time, value)` sample for a snapshot at a given cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutoffObservation {
    pub time: f64,
    #[serde(rename = "rf")]
    pub value: f64,
}

impl CutoffObservation {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Decode the output of one footprint helper run.
///
/// Returns `Ok(None)` when the helper printed nothing.
pub fn decode_footprint<S: AsRef<str>>(lines: &[S]) -> PipelineResult<Option<CutoffObservation>> {
    let last = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .last();

    match last {
        Some(line) => parse_observation(line).map(Some),
        None => Ok(None),
    }
}

/// Split a `time,value` line into an observation.
pub fn parse_observation(line: &str) -> PipelineResult<CutoffObservation> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 2 {
        return Err(PipelineError::unexpected(line));
    }
    let time = parse_number(fields[0], line)?;
    let value = parse_number(fields[1], line)?;
    Ok(CutoffObservation::new(time, value))
}
