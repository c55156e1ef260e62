//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cutoff radii evaluated when none are configured.
pub const DEFAULT_CUTOFFS: [f64; 5] = [1e-3, 2.5e-3, 5e-3, 1e-2, 5e-2];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub helpers: HelpersConfig,
    #[serde(default)]
    pub footprint: FootprintConfig,
}

/// Snapshot range and parallelism
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Number of worker threads
    #[serde(default = "default_cpus")]
    pub cpus: usize,
    /// Number of snapshot indices to consider
    #[serde(default = "default_snapshots")]
    pub snapshots: usize,
    /// Physical time between consecutive snapshots
    #[serde(default = "default_stride")]
    pub stride: f64,
}

pub fn default_cpus() -> usize {
    4
}

pub fn default_snapshots() -> usize {
    4000
}

pub fn default_stride() -> f64 {
    0.01
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cpus: default_cpus(),
            snapshots: default_snapshots(),
            stride: default_stride(),
        }
    }
}

/// Rendered domain and sampling density
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainConfig {
    #[serde(default = "default_zmin")]
    pub zmin: f64,
    #[serde(default = "default_zmax")]
    pub zmax: f64,
    /// Radial half-width; the rendered domain spans [-rmax, rmax]
    #[serde(default = "default_rmax")]
    pub rmax: f64,
    /// Field samples per unit radius
    #[serde(default = "default_grids_per_r")]
    pub grids_per_r: usize,
}

fn default_zmin() -> f64 {
    0.0
}

fn default_zmax() -> f64 {
    4.0
}

fn default_rmax() -> f64 {
    4.0
}

fn default_grids_per_r() -> usize {
    256
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            zmin: default_zmin(),
            zmax: default_zmax(),
            rmax: default_rmax(),
            grids_per_r: default_grids_per_r(),
        }
    }
}

/// Paths of the compiled extraction helpers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HelpersConfig {
    #[serde(default = "default_facets_helper")]
    pub facets: PathBuf,
    #[serde(default = "default_field_helper")]
    pub field: PathBuf,
    #[serde(default = "default_footprint_helper")]
    pub footprint: PathBuf,
    /// Seconds to wait for a single helper run; 0 waits indefinitely
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_facets_helper() -> PathBuf {
    PathBuf::from("./getFacet")
}

fn default_field_helper() -> PathBuf {
    PathBuf::from("./getData-generic")
}

fn default_footprint_helper() -> PathBuf {
    PathBuf::from("./getFootPrint")
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            facets: default_facets_helper(),
            field: default_field_helper(),
            footprint: default_footprint_helper(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Footprint extraction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FootprintConfig {
    /// Cutoff radii, one series file each
    #[serde(default = "default_cutoffs")]
    pub cutoffs: Vec<f64>,
}

fn default_cutoffs() -> Vec<f64> {
    DEFAULT_CUTOFFS.to_vec()
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            cutoffs: default_cutoffs(),
        }
    }
}
