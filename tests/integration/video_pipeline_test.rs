//! End-to-end frame rendering with scripted helpers

use bpost::pipeline::video;
use bpost::{Config, PipelineError, PlotStyle, RuntimeConfig, WorkerPool};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::helpers::{create_snapshots, LogCapture, ScriptedRunner};

fn runtime(case: &Path, cpus: usize) -> RuntimeConfig {
    let mut config = Config::default();
    config.run.cpus = cpus;
    config.run.snapshots = 3;
    config.domain.rmax = 1.0;
    config.domain.zmax = 1.0;
    config.domain.grids_per_r = 4;
    config.helpers.facets = PathBuf::from("/helpers/facets");
    config.helpers.field = PathBuf::from("/helpers/field");
    config.runtime(case, None).unwrap()
}

fn small_style() -> PlotStyle {
    PlotStyle::default().with_size(192, 108)
}

#[test]
#[cfg_attr(miri, ignore)]
fn missing_snapshot_yields_two_frames_and_one_skip() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 3, &[1]);
    let config = runtime(temp.path(), 2);
    let runner = ScriptedRunner::new();

    let summary = video::run(&config, &small_style(), &runner, &WorkerPool::new(2)).unwrap();

    assert_eq!(summary.rendered, 2);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.already_produced, 0);

    let video_dir = temp.path().join("Video");
    assert!(video_dir.join("00000000.png").is_file());
    assert!(!video_dir.join("00000010.png").exists());
    assert!(video_dir.join("00000020.png").is_file());
    // facets + field per rendered frame
    assert_eq!(runner.call_count(), 4);
}

#[test]
#[cfg_attr(miri, ignore)]
fn missing_snapshot_logs_exactly_one_warning() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 3, &[1]);
    let config = runtime(temp.path(), 1);
    let runner = ScriptedRunner::new();
    let logs = LogCapture::new();

    let summary = logs
        .capture(|| video::run(&config, &small_style(), &runner, &WorkerPool::new(1)))
        .unwrap();
    assert_eq!(summary.missing, 1);

    let warnings = logs.lines_with("WARN", "Missing snapshot");
    assert_eq!(warnings.len(), 1, "{}", logs.contents());
    assert!(warnings[0].contains("index=1"));
    assert!(warnings[0].contains("snapshot-0.0100"));
    assert_eq!(logs.lines_with("INFO", "Saved frame").len(), 2);
}

#[test]
#[cfg_attr(miri, ignore)]
fn field_helper_receives_domain_arguments() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 1, &[]);
    let config = runtime(temp.path(), 1);
    let runner = ScriptedRunner::new();

    video::run(&config, &small_style(), &runner, &WorkerPool::new(1)).unwrap();

    let calls = runner.calls.lock().unwrap();
    let (_, field_args) = calls
        .iter()
        .find(|(name, _)| name == "field")
        .expect("field helper was called");
    assert!(field_args[0].ends_with("snapshot-0.0000"));
    assert_eq!(&field_args[1..], ["0.0", "0", "1.0", "1.0", "4"]);
}

#[test]
#[cfg_attr(miri, ignore)]
fn rerun_skips_every_existing_frame() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 3, &[1]);
    let config = runtime(temp.path(), 2);

    let first = ScriptedRunner::new();
    video::run(&config, &small_style(), &first, &WorkerPool::new(2)).unwrap();
    let frame = temp.path().join("Video").join("00000000.png");
    let before = std::fs::read(&frame).unwrap();

    let second = ScriptedRunner::new();
    let summary = video::run(&config, &small_style(), &second, &WorkerPool::new(2)).unwrap();

    assert_eq!(summary.rendered, 0);
    assert_eq!(summary.already_produced, 2);
    assert_eq!(summary.missing, 1);
    assert_eq!(second.call_count(), 0);
    assert_eq!(std::fs::read(&frame).unwrap(), before);
}

#[test]
#[cfg_attr(miri, ignore)]
fn helper_failure_fails_the_run() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 3, &[]);
    let config = runtime(temp.path(), 1);
    let mut runner = ScriptedRunner::new();
    runner.failing_times = vec![0.01];

    let err = video::run(&config, &small_style(), &runner, &WorkerPool::new(1)).unwrap_err();
    assert!(matches!(err, PipelineError::HelperProcessFailure { .. }));
    assert!(!temp.path().join("Video").join("00000020.png").exists());
}

#[test]
#[cfg_attr(miri, ignore)]
fn explicit_output_dir_is_created() {
    let temp = TempDir::new().unwrap();
    create_snapshots(temp.path(), 0.01, 1, &[]);
    let mut config = Config::default();
    config.run.snapshots = 1;
    config.run.cpus = 1;
    config.domain.rmax = 1.0;
    config.domain.grids_per_r = 4;
    config.helpers.facets = PathBuf::from("facets");
    config.helpers.field = PathBuf::from("field");
    let out = temp.path().join("frames").join("nested");
    let runtime = config.runtime(temp.path(), Some(&out)).unwrap();

    video::run(&runtime, &small_style(), &ScriptedRunner::new(), &WorkerPool::new(1)).unwrap();
    assert!(out.join("00000000.png").is_file());
}
