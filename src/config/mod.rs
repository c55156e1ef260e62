//! Configuration management for bpost
//!
//! File configuration (`Config`, TOML) is layered with command-line overrides
//! (`ConfigOverrides`) and then validated into an immutable `RuntimeConfig`.

mod io;
mod runtime;
mod types;

pub use runtime::{ConfigError, DomainBounds, HelperPaths, RuntimeConfig, DEFAULT_OUTPUT_SUBDIR};
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub cpus: Option<usize>,
    pub snapshots: Option<usize>,
    pub stride: Option<f64>,
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
    pub rmax: Option<f64>,
    pub grids_per_r: Option<usize>,
    pub facets_helper: Option<PathBuf>,
    pub field_helper: Option<PathBuf>,
    pub footprint_helper: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub cutoffs: Option<Vec<f64>>,
}

impl Config {
    /// Get the config file path (~/.config/bpost/config.toml on Linux)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load an explicit config file if given, else the default location.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => io::load_file(path),
            None => io::load(),
        }
    }

    /// Apply command-line overrides on top of the file values.
    ///
    /// An empty cutoff list keeps the configured cutoffs.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(cpus) = overrides.cpus {
            self.run.cpus = cpus;
        }
        if let Some(snapshots) = overrides.snapshots {
            self.run.snapshots = snapshots;
        }
        if let Some(stride) = overrides.stride {
            self.run.stride = stride;
        }
        if let Some(zmin) = overrides.zmin {
            self.domain.zmin = zmin;
        }
        if let Some(zmax) = overrides.zmax {
            self.domain.zmax = zmax;
        }
        if let Some(rmax) = overrides.rmax {
            self.domain.rmax = rmax;
        }
        if let Some(grids_per_r) = overrides.grids_per_r {
            self.domain.grids_per_r = grids_per_r;
        }
        if let Some(ref path) = overrides.facets_helper {
            self.helpers.facets = path.clone();
        }
        if let Some(ref path) = overrides.field_helper {
            self.helpers.field = path.clone();
        }
        if let Some(ref path) = overrides.footprint_helper {
            self.helpers.footprint = path.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            self.helpers.timeout_secs = secs;
        }
        if let Some(ref cutoffs) = overrides.cutoffs {
            if !cutoffs.is_empty() {
                self.footprint.cutoffs = cutoffs.clone();
            }
        }
    }

    /// Validate and bind to a case directory.
    pub fn runtime(
        &self,
        case_dir: &Path,
        output_dir: Option<&Path>,
    ) -> std::result::Result<RuntimeConfig, ConfigError> {
        RuntimeConfig::from_config(self, case_dir, output_dir)
    }
}
