//! Frame rendering over every snapshot.
//!
//! Each snapshot becomes one PNG. Missing snapshots and frames that already
//! exist are skipped before any helper runs, so re-running over a partly
//! rendered case only fills the gaps. Any other failure aborts the run.

use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::RuntimeConfig;
use crate::decode::{decode_facets, decode_field};
use crate::error::{PipelineError, PipelineResult};
use crate::helper::{float_arg, HelperRunner};
use crate::render::{compose_frame, PlotStyle};
use crate::snapshot::{frame_name_overflows, SnapshotIdentity};
use crate::worker::WorkerPool;

/// What happened to a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    AlreadyProduced,
    Missing,
}

/// Counts of frame outcomes for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub already_produced: usize,
    pub missing: usize,
}

impl RenderSummary {
    fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Rendered => self.rendered += 1,
            FrameOutcome::AlreadyProduced => self.already_produced += 1,
            FrameOutcome::Missing => self.missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.rendered + self.already_produced + self.missing
    }
}

/// Render a frame for every snapshot of the run.
pub fn run(
    config: &RuntimeConfig,
    style: &PlotStyle,
    runner: &dyn HelperRunner,
    pool: &WorkerPool,
) -> PipelineResult<RenderSummary> {
    let output_dir = config.output_dir();
    fs::create_dir_all(output_dir).map_err(|source| PipelineError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let snapshots = config.frame_snapshots();
    if let Some(last) = snapshots.last() {
        if frame_name_overflows(last.time()) {
            warn!(
                time = last.time(),
                "Frame names exceed 8 digits; later frames will not sort lexically"
            );
        }
    }

    info!(
        snapshots = snapshots.len(),
        workers = pool.workers(),
        output = %output_dir.display(),
        "Rendering frames"
    );

    let outcomes = pool.try_map(&snapshots, |snapshot| {
        render_snapshot(snapshot, config, style, runner).map_err(|err| {
            error!(
                index = snapshot.index(),
                time = snapshot.time(),
                path = %snapshot.source().display(),
                error = %err,
                "Failed to render snapshot"
            );
            err
        })
    })?;

    let mut summary = RenderSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    info!(
        rendered = summary.rendered,
        already_produced = summary.already_produced,
        missing = summary.missing,
        "Rendering finished"
    );
    Ok(summary)
}

/// Process one snapshot: skip checks, both helpers, then composition.
pub fn render_snapshot(
    snapshot: &SnapshotIdentity,
    config: &RuntimeConfig,
    style: &PlotStyle,
    runner: &dyn HelperRunner,
) -> PipelineResult<FrameOutcome> {
    let target = match check_snapshot(snapshot) {
        Ok(target) => target,
        Err(PipelineError::MissingSnapshot { path }) => {
            warn!(
                index = snapshot.index(),
                time = snapshot.time(),
                path = %path.display(),
                "Missing snapshot"
            );
            return Ok(FrameOutcome::Missing);
        }
        Err(PipelineError::AlreadyProduced { path }) => {
            info!(
                index = snapshot.index(),
                time = snapshot.time(),
                path = %path.display(),
                "Frame already exists, skipping"
            );
            return Ok(FrameOutcome::AlreadyProduced);
        }
        Err(err) => return Err(err),
    };

    info!(
        index = snapshot.index(),
        time = snapshot.time(),
        "Processing snapshot"
    );

    let helpers = config.helpers();
    let source = snapshot.source().display().to_string();

    let facet_lines = runner.run(&helpers.facets, &[source.clone()])?;
    let facets = decode_facets(&facet_lines)?;

    let bounds = config.bounds();
    let nr = config.radial_resolution();
    let field_args = [
        source,
        float_arg(bounds.zmin()),
        "0".to_string(),
        float_arg(bounds.zmax()),
        float_arg(bounds.rmax()),
        nr.to_string(),
    ];
    let field_lines = runner.run(&helpers.field, &field_args)?;
    let field = decode_field(&field_lines, nr)?;

    compose_frame(&field, &facets, bounds, snapshot.time(), target, style)?;
    info!(path = %target.display(), "Saved frame");
    Ok(FrameOutcome::Rendered)
}

/// Classify a snapshot before any work and return its frame path.
fn check_snapshot(snapshot: &SnapshotIdentity) -> PipelineResult<&Path> {
    if !snapshot.source().exists() {
        return Err(PipelineError::MissingSnapshot {
            path: snapshot.source().to_path_buf(),
        });
    }
    match snapshot.destination() {
        Some(target) if target.exists() => Err(PipelineError::AlreadyProduced {
            path: target.to_path_buf(),
        }),
        Some(target) => Ok(target),
        None => Err(PipelineError::Render {
            path: snapshot.source().to_path_buf(),
            message: "snapshot has no frame destination".to_string(),
        }),
    }
}
