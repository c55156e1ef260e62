//! Command handlers for the bpost CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod footprint;
pub mod video;

use anyhow::{bail, Context, Result};
use std::path::Path;

use bpost::{Config, ConfigOverrides, Interrupt, RuntimeConfig};

/// Load the file configuration, apply CLI overrides and validate it.
pub fn resolve_runtime(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
    case_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<RuntimeConfig> {
    if !case_dir.is_dir() {
        bail!("Case directory not found: {}", case_dir.display());
    }

    let mut config = Config::load_from(config_file)?;
    config.apply(overrides);
    config
        .runtime(case_dir, output_dir)
        .context("Invalid configuration")
}

/// Interrupt flag wired to Ctrl-C.
///
/// Failing to install the handler only loses graceful shutdown, so it is
/// logged rather than fatal.
#[cfg(not(tarpaulin_include))]
pub fn install_interrupt() -> Interrupt {
    let interrupt = Interrupt::new();
    if let Err(e) = interrupt.install_ctrlc_handler() {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
    }
    interrupt
}
