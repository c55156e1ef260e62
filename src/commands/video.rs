//! Video command handler

use anyhow::{Context, Result};
use std::path::Path;

use bpost::cli::VideoArgs;
use bpost::pipeline::video;
use bpost::{PlotStyle, ProcessRunner, WorkerPool};

use super::{install_interrupt, resolve_runtime};

/// Render every snapshot of the case into PNG frames.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &VideoArgs, config_file: Option<&Path>) -> Result<()> {
    let runtime = resolve_runtime(
        config_file,
        &args.overrides(),
        &args.run.case,
        args.output.as_deref(),
    )?;

    let interrupt = install_interrupt();
    let runner = ProcessRunner::new(runtime.helper_timeout()).with_interrupt(interrupt.clone());
    let pool = WorkerPool::new(runtime.cpus()).with_interrupt(interrupt);
    let style = PlotStyle::default();

    let summary = video::run(&runtime, &style, &runner, &pool)
        .with_context(|| format!("Rendering {} failed", runtime.case_dir().display()))?;

    println!(
        "Frames in {}: {} rendered, {} already present, {} snapshots missing",
        runtime.output_dir().display(),
        summary.rendered,
        summary.already_produced,
        summary.missing
    );
    Ok(())
}
