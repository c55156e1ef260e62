//! Footprint command handler

use anyhow::{bail, Context, Result};
use std::path::Path;

use bpost::cli::FootprintArgs;
use bpost::pipeline::footprint;
use bpost::{ProcessRunner, WorkerPool};

use super::{install_interrupt, resolve_runtime};

/// Write one footprint series per cutoff into the case directory.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &FootprintArgs, config_file: Option<&Path>) -> Result<()> {
    let runtime = resolve_runtime(config_file, &args.overrides(), &args.run.case, None)?;

    let binary = &runtime.helpers().footprint;
    if !binary.is_file() {
        bail!("Footprint helper not found: {}", binary.display());
    }

    let interrupt = install_interrupt();
    let runner = ProcessRunner::new(runtime.helper_timeout()).with_interrupt(interrupt.clone());
    let pool = WorkerPool::new(runtime.cpus()).with_interrupt(interrupt);

    let reports = footprint::run(&runtime, &runner, &pool)
        .with_context(|| format!("Footprint extraction in {} failed", runtime.case_dir().display()))?;

    for report in &reports {
        println!(
            "Wrote {} rows to {} ({} missing, {} without observation, {} failed)",
            report.rows,
            report.path.display(),
            report.missing,
            report.no_observation,
            report.failed
        );
    }
    Ok(())
}
