//! Footprint series aggregation.
//!
//! For each cutoff, the footprint helper runs once per snapshot. Unlike frame
//! rendering, a failing snapshot never aborts a pass: it is logged and left
//! out of the series. Passes run one cutoff at a time.

use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::RuntimeConfig;
use crate::decode::{decode_footprint, CutoffObservation};
use crate::error::{PipelineError, PipelineResult};
use crate::helper::{float_arg, HelperRunner};
use crate::series::{write_series, ThresholdSeries};
use crate::snapshot::SnapshotIdentity;
use crate::worker::WorkerPool;

/// Result of evaluating one snapshot at one cutoff.
#[derive(Debug)]
pub enum FootprintOutcome {
    Observed(CutoffObservation),
    /// The helper ran and printed nothing.
    NoObservation,
    Skipped(PipelineError),
    Failed(PipelineError),
}

/// Summary of one written series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReport {
    pub cutoff: f64,
    pub path: PathBuf,
    pub rows: usize,
    pub missing: usize,
    pub no_observation: usize,
    pub failed: usize,
}

/// Evaluate one snapshot. Never returns an error; failures become outcomes.
pub fn evaluate_snapshot(
    snapshot: &SnapshotIdentity,
    cutoff: f64,
    config: &RuntimeConfig,
    runner: &dyn HelperRunner,
) -> FootprintOutcome {
    if !snapshot.source().exists() {
        return FootprintOutcome::Skipped(PipelineError::MissingSnapshot {
            path: snapshot.source().to_path_buf(),
        });
    }

    let args = [snapshot.source().display().to_string(), float_arg(cutoff)];
    let result = runner
        .run(&config.helpers().footprint, &args)
        .and_then(|lines| decode_footprint(&lines));

    match result {
        Ok(Some(observation)) => FootprintOutcome::Observed(observation),
        Ok(None) => FootprintOutcome::NoObservation,
        Err(err) => FootprintOutcome::Failed(err),
    }
}

/// Build and write the series for a single cutoff.
pub fn run_cutoff(
    cutoff: f64,
    config: &RuntimeConfig,
    runner: &dyn HelperRunner,
    pool: &WorkerPool,
) -> PipelineResult<SeriesReport> {
    let snapshots = config.source_snapshots();
    info!(
        cutoff,
        snapshots = snapshots.len(),
        workers = pool.workers(),
        "Evaluating footprint"
    );

    let outcomes = pool.map(&snapshots, |snapshot| {
        evaluate_snapshot(snapshot, cutoff, config, runner)
    });

    // a partial pass must not overwrite a complete series
    if outcomes.len() < snapshots.len() || pool.interrupt().is_triggered() {
        return Err(PipelineError::Interrupted);
    }

    let mut observations = Vec::new();
    let mut missing = 0;
    let mut no_observation = 0;
    let mut failed = 0;

    for (snapshot, outcome) in snapshots.iter().zip(outcomes) {
        match outcome {
            FootprintOutcome::Observed(obs) => {
                info!(cutoff, t = obs.time, rf = obs.value, "Observed footprint");
                observations.push(obs);
            }
            FootprintOutcome::NoObservation => no_observation += 1,
            FootprintOutcome::Skipped(err) => {
                missing += 1;
                warn!(
                    index = snapshot.index(),
                    time = snapshot.time(),
                    path = %snapshot.source().display(),
                    cutoff,
                    "{}", err
                );
            }
            FootprintOutcome::Failed(err) => {
                failed += 1;
                error!(
                    index = snapshot.index(),
                    time = snapshot.time(),
                    path = %snapshot.source().display(),
                    cutoff,
                    error = %err,
                    "Footprint extraction failed"
                );
            }
        }
    }

    let series = ThresholdSeries::new(cutoff, observations);
    let path = write_series(&series, config.case_dir())?;

    Ok(SeriesReport {
        cutoff,
        path,
        rows: series.len(),
        missing,
        no_observation,
        failed,
    })
}

/// Write one series per configured cutoff, in order.
pub fn run(
    config: &RuntimeConfig,
    runner: &dyn HelperRunner,
    pool: &WorkerPool,
) -> PipelineResult<Vec<SeriesReport>> {
    config
        .cutoffs()
        .iter()
        .map(|&cutoff| run_cutoff(cutoff, config, runner, pool))
        .collect()
}
