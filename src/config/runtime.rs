//! Validated, immutable run configuration.
//!
//! `RuntimeConfig` is built once from the file/CLI configuration and then
//! shared by reference with every worker. Nothing mutates it after
//! construction, so no locking is needed.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::types::Config;
use crate::snapshot::{self, SnapshotIdentity};

/// Default frame directory, relative to the case directory.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "Video";

/// Reasons a configuration is rejected before any work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("run.cpus must be >= 1")]
    NoWorkers,

    #[error("run.snapshots must be >= 1")]
    NoSnapshots,

    #[error("run.stride must be positive, got {0}")]
    InvalidStride(f64),

    #[error("domain.rmax must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("domain.zmax ({zmax}) must be greater than domain.zmin ({zmin})")]
    InvalidAxialRange { zmin: f64, zmax: f64 },

    #[error("domain.grids_per_r ({grids_per_r}) x domain.rmax ({rmax}) gives no radial samples")]
    NoRadialSamples { grids_per_r: usize, rmax: f64 },

    #[error("footprint cutoffs must be positive, got {0}")]
    InvalidCutoff(f64),
}

/// Rendered domain in cylindrical coordinates, symmetric about `r = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    rmax: f64,
    zmin: f64,
    zmax: f64,
}

impl DomainBounds {
    /// `rmin` is always `-rmax`.
    pub fn new(rmax: f64, zmin: f64, zmax: f64) -> Self {
        Self { rmax, zmin, zmax }
    }

    pub fn rmin(&self) -> f64 {
        -self.rmax
    }

    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    pub fn zmin(&self) -> f64 {
        self.zmin
    }

    pub fn zmax(&self) -> f64 {
        self.zmax
    }

    /// Full radial span, `rmax - rmin`.
    pub fn radial_span(&self) -> f64 {
        self.rmax - self.rmin()
    }

    pub fn axial_span(&self) -> f64 {
        self.zmax - self.zmin
    }
}

/// Resolved helper executables.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperPaths {
    pub facets: PathBuf,
    pub field: PathBuf,
    pub footprint: PathBuf,
}

/// Immutable configuration shared by every worker.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    cpus: usize,
    snapshots: usize,
    stride: f64,
    bounds: DomainBounds,
    grids_per_r: usize,
    case_dir: PathBuf,
    output_dir: PathBuf,
    helpers: HelperPaths,
    helper_timeout: Option<Duration>,
    cutoffs: Vec<f64>,
}

impl RuntimeConfig {
    /// Validate `config` and bind it to a case directory.
    ///
    /// Frames go to `output_dir`, or `<case_dir>/Video` when not given.
    pub fn from_config(
        config: &Config,
        case_dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let run = &config.run;
        let domain = &config.domain;

        if run.cpus < 1 {
            return Err(ConfigError::NoWorkers);
        }
        if run.snapshots < 1 {
            return Err(ConfigError::NoSnapshots);
        }
        if !(run.stride.is_finite() && run.stride > 0.0) {
            return Err(ConfigError::InvalidStride(run.stride));
        }
        if !(domain.rmax.is_finite() && domain.rmax > 0.0) {
            return Err(ConfigError::InvalidRadius(domain.rmax));
        }
        if !(domain.zmin.is_finite() && domain.zmax.is_finite() && domain.zmax > domain.zmin) {
            return Err(ConfigError::InvalidAxialRange {
                zmin: domain.zmin,
                zmax: domain.zmax,
            });
        }
        if radial_resolution(domain.grids_per_r, domain.rmax) == 0 {
            return Err(ConfigError::NoRadialSamples {
                grids_per_r: domain.grids_per_r,
                rmax: domain.rmax,
            });
        }
        if let Some(&bad) = config
            .footprint
            .cutoffs
            .iter()
            .find(|c| !(c.is_finite() && **c > 0.0))
        {
            return Err(ConfigError::InvalidCutoff(bad));
        }

        let helper_timeout = match config.helpers.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            cpus: run.cpus,
            snapshots: run.snapshots,
            stride: run.stride,
            bounds: DomainBounds::new(domain.rmax, domain.zmin, domain.zmax),
            grids_per_r: domain.grids_per_r,
            case_dir: case_dir.to_path_buf(),
            output_dir: output_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| case_dir.join(DEFAULT_OUTPUT_SUBDIR)),
            helpers: HelperPaths {
                facets: config.helpers.facets.clone(),
                field: config.helpers.field.clone(),
                footprint: config.helpers.footprint.clone(),
            },
            helper_timeout,
            cutoffs: config.footprint.cutoffs.clone(),
        })
    }

    pub fn cpus(&self) -> usize {
        self.cpus
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }

    pub fn stride(&self) -> f64 {
        self.stride
    }

    pub fn bounds(&self) -> &DomainBounds {
        &self.bounds
    }

    pub fn grids_per_r(&self) -> usize {
        self.grids_per_r
    }

    pub fn case_dir(&self) -> &Path {
        &self.case_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn helpers(&self) -> &HelperPaths {
        &self.helpers
    }

    /// Bounded wait for a single helper run, if any.
    pub fn helper_timeout(&self) -> Option<Duration> {
        self.helper_timeout
    }

    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    /// Field samples per row passed to the field helper.
    pub fn radial_resolution(&self) -> usize {
        radial_resolution(self.grids_per_r, self.bounds.rmax())
    }

    /// Snapshots paired with their frame destinations.
    pub fn frame_snapshots(&self) -> Vec<SnapshotIdentity> {
        snapshot::enumerate(
            self.stride,
            self.snapshots,
            &self.case_dir,
            Some(&self.output_dir),
        )
    }

    /// Snapshots without frame destinations.
    pub fn source_snapshots(&self) -> Vec<SnapshotIdentity> {
        snapshot::enumerate(self.stride, self.snapshots, &self.case_dir, None)
    }
}

/// Samples per row: `grids_per_r * rmax`, truncated.
fn radial_resolution(grids_per_r: usize, rmax: f64) -> usize {
    (grids_per_r as f64 * rmax) as usize
}
