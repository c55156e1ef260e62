//! Snapshot enumeration.
//!
//! Turns a stride and a count into the ordered list of candidate snapshots.
//! This is pure path arithmetic: whether a snapshot actually exists is checked
//! later by the worker that consumes it.

use std::path::{Path, PathBuf};

/// Sub-directory of a case that holds the restart snapshots.
pub const SNAPSHOT_SUBDIR: &str = "intermediate";

/// Minimum number of digits in a frame file name.
pub const FRAME_NAME_WIDTH: usize = 8;

/// Largest millisecond count that fits in `FRAME_NAME_WIDTH` digits.
const MAX_PADDED_MILLIS: u64 = 99_999_999;

/// One candidate snapshot and, for rendering, the frame it produces.
///
/// Fields are private: `time` is always `index * stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotIdentity {
    index: usize,
    time: f64,
    source: PathBuf,
    destination: Option<PathBuf>,
}

impl SnapshotIdentity {
    /// Build the identity for `index` in a run with the given stride.
    pub fn new(index: usize, stride: f64, case_dir: &Path, output_dir: Option<&Path>) -> Self {
        let time = index as f64 * stride;
        let source = case_dir
            .join(SNAPSHOT_SUBDIR)
            .join(snapshot_file_name(time));
        let destination = output_dir.map(|dir| dir.join(frame_file_name(time)));
        Self {
            index,
            time,
            source,
            destination,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Physical time of the snapshot.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Path of the snapshot file read by the helpers.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path of the rendered frame, if this identity was built for rendering.
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }
}

/// Produce exactly `count` identities for indices `0..count`.
pub fn enumerate(
    stride: f64,
    count: usize,
    case_dir: &Path,
    output_dir: Option<&Path>,
) -> Vec<SnapshotIdentity> {
    (0..count)
        .map(|index| SnapshotIdentity::new(index, stride, case_dir, output_dir))
        .collect()
}

/// Snapshot file name for a physical time, e.g. `snapshot-0.0100`.
pub fn snapshot_file_name(time: f64) -> String {
    format!("snapshot-{:.4}", time)
}

/// Time in whole milliseconds, rounded to the nearest integer.
pub fn frame_millis(time: f64) -> u64 {
    (time * 1000.0).round() as u64
}

/// Frame file name for a physical time, e.g. `00000010.png`.
///
/// Times past the padded width get a wider name instead of being truncated.
pub fn frame_file_name(time: f64) -> String {
    format!(
        "{:0width$}.png",
        frame_millis(time),
        width = FRAME_NAME_WIDTH
    )
}

/// Whether the frame name for `time` needs more than `FRAME_NAME_WIDTH` digits.
pub fn frame_name_overflows(time: f64) -> bool {
    frame_millis(time) > MAX_PADDED_MILLIS
}
