//! Unit tests for snapshot enumeration

use bpost::snapshot::{enumerate, frame_file_name, SNAPSHOT_SUBDIR};
use std::path::Path;

#[test]
fn times_are_index_times_stride() {
    let snapshots = enumerate(0.25, 4, Path::new("case"), None);
    let times: Vec<f64> = snapshots.iter().map(|s| s.time()).collect();
    assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    let indices: Vec<usize> = snapshots.iter().map(|s| s.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn sources_live_in_intermediate() {
    let snapshots = enumerate(0.01, 2, Path::new("case"), None);
    assert_eq!(
        snapshots[1].source(),
        Path::new("case").join(SNAPSHOT_SUBDIR).join("snapshot-0.0100")
    );
    assert!(snapshots[1].destination().is_none());
}

#[test]
fn destinations_use_millisecond_names() {
    let snapshots = enumerate(0.01, 3, Path::new("case"), Some(Path::new("out")));
    let names: Vec<String> = snapshots
        .iter()
        .map(|s| {
            s.destination()
                .unwrap()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["00000000.png", "00000010.png", "00000020.png"]);
}

#[test]
fn frame_names_sort_like_times() {
    let mut names: Vec<String> = (0..200).map(|i| frame_file_name(i as f64 * 0.01)).collect();
    let expected = names.clone();
    names.sort();
    assert_eq!(names, expected);
}
