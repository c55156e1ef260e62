//! CLI definitions for bpost
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so integration tests and completion generation can reach them.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "bpost")]
#[command(about = "Post-process drop-impact simulation snapshots into video frames and footprint series")]
#[command(
    long_about = "bpost - post-processing for axisymmetric drop-impact simulations.

bpost runs the compiled extraction helpers (getFacet, getData-generic,
getFootPrint) over every snapshot in <case>/intermediate/ and assembles
their output in parallel.

QUICK START:
    bpost video --case 1000              Render frames to 1000/Video/
    bpost footprint --case 1000          Write 1000/rFootvsTime_<cutoff>.csv
    bpost config show                    Show effective configuration

Re-running `video` only renders frames that do not exist yet."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Configuration file (default: ~/.config/bpost/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. debug, bpost=trace)
    #[arg(long, global = true, default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one PNG frame per snapshot
    #[command(long_about = "Render one PNG frame per snapshot.

Each frame shows the interface, the strain-rate field mirrored onto the
left half, and the velocity magnitude on the right half. Frames are named
after the snapshot time in milliseconds (00000010.png for t = 0.01).

Missing snapshots are skipped with a warning. Frames that already exist
are left untouched. Any helper or decoding failure aborts the run.

EXAMPLES:
    bpost video --case 1000
    bpost video --case 1000 --cpus 8 --rmax 2 --zmax 2
    bpost video --case 1000 --output /tmp/frames")]
    Video(VideoArgs),

    /// Write footprint time series, one CSV per cutoff
    #[command(long_about = "Write footprint time series, one CSV per cutoff.

For every cutoff the footprint helper runs over all snapshots and the
observations are written, sorted by time, to <case>/rFootvsTime_<cutoff>.csv
with the header `time,rf`. Snapshots that are missing or whose helper run
fails are logged and left out of the series.

EXAMPLES:
    bpost footprint --case 1000
    bpost footprint --case 1000 --cutoffs 0.01 0.05 --binary ./getFootPrint")]
    Footprint(FootprintArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Options shared by both pipelines.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Case directory containing intermediate/snapshot-*
    #[arg(long, value_name = "DIR")]
    pub case: PathBuf,

    /// Number of worker threads
    #[arg(long)]
    pub cpus: Option<usize>,

    /// Number of snapshot indices to consider
    #[arg(long)]
    pub snapshots: Option<usize>,

    /// Time between consecutive snapshots
    #[arg(long)]
    pub stride: Option<f64>,

    /// Seconds to wait for a single helper run (0 waits indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct VideoArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Frame directory (default: <case>/Video)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    pub zmin: Option<f64>,

    #[arg(long)]
    pub zmax: Option<f64>,

    /// Radial half-width of the rendered domain
    #[arg(long)]
    pub rmax: Option<f64>,

    /// Field samples per unit radius
    #[arg(long)]
    pub grids_per_r: Option<usize>,

    /// Facet helper executable
    #[arg(long, value_name = "PATH")]
    pub facets_helper: Option<PathBuf>,

    /// Field helper executable
    #[arg(long, value_name = "PATH")]
    pub field_helper: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FootprintArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Footprint helper executable
    #[arg(long, value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Cutoff radii, one series each
    #[arg(long, num_args = 1..)]
    pub cutoffs: Vec<f64>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective configuration as TOML
    Show,
    /// Print the default configuration file path
    Path,
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cpus: self.cpus,
            snapshots: self.snapshots,
            stride: self.stride,
            timeout_secs: self.timeout,
            ..ConfigOverrides::default()
        }
    }
}

impl VideoArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            zmin: self.zmin,
            zmax: self.zmax,
            rmax: self.rmax,
            grids_per_r: self.grids_per_r,
            facets_helper: self.facets_helper.clone(),
            field_helper: self.field_helper.clone(),
            ..self.run.overrides()
        }
    }
}

impl FootprintArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            footprint_helper: self.binary.clone(),
            cutoffs: Some(self.cutoffs.clone()),
            ..self.run.overrides()
        }
    }
}
