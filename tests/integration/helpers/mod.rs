//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use bpost::{HelperRunner, PipelineError, PipelineResult};

/// Write an empty snapshot file for every index not in `skip`.
pub fn create_snapshots(case_dir: &Path, stride: f64, count: usize, skip: &[usize]) {
    let intermediate = case_dir.join(bpost::snapshot::SNAPSHOT_SUBDIR);
    fs::create_dir_all(&intermediate).expect("Failed to create intermediate dir");
    for i in (0..count).filter(|i| !skip.contains(i)) {
        let path = intermediate.join(bpost::snapshot::snapshot_file_name(i as f64 * stride));
        fs::write(&path, b"").expect("Failed to write snapshot");
    }
}

/// Time encoded in a snapshot path (`.../snapshot-0.0200`).
pub fn snapshot_time(path: &str) -> f64 {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("snapshot-"))
        .and_then(|t| t.parse().ok())
        .unwrap_or_else(|| panic!("not a snapshot path: {}", path))
}

/// In-process stand-in for the three extraction helpers.
///
/// Dispatches on the helper file name: `facets`, `field` or `footprint`.
pub struct ScriptedRunner {
    /// Snapshot times for which the footprint helper prints nothing
    pub silent_times: Vec<f64>,
    /// Snapshot times for which every helper fails
    pub failing_times: Vec<f64>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            silent_times: Vec::new(),
            failing_times: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn matches(times: &[f64], time: f64) -> bool {
        times.iter().any(|t| (t - time).abs() < 1e-9)
    }
}

impl HelperRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[String]) -> PipelineResult<Vec<String>> {
        let name = program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.calls
            .lock()
            .unwrap()
            .push((name.clone(), args.to_vec()));

        let time = snapshot_time(&args[0]);
        if Self::matches(&self.failing_times, time) {
            return Err(PipelineError::HelperProcessFailure {
                command: name,
                code: 1,
                stderr: "restore failed".to_string(),
            });
        }

        match name.as_str() {
            "facets" => Ok(facet_output(120)),
            "field" => {
                let nr: usize = args[5].parse().expect("nr argument");
                Ok(field_output(nr, 3))
            }
            "footprint" if Self::matches(&self.silent_times, time) => Ok(Vec::new()),
            "footprint" => Ok(vec![
                "log: restoring".to_string(),
                format!("{},{}", time, time * 0.5),
            ]),
            other => panic!("unknown helper {}", other),
        }
    }
}

/// `n` facet lines forming `n / 2` two-point polylines.
pub fn facet_output(n: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..n / 2 {
        let z = 0.1 + i as f64 * 0.005;
        lines.push(format!("{} {}", z, 0.3));
        lines.push(format!("{} {}", z + 0.005, 0.31));
        lines.push(String::new());
    }
    lines
}

/// `rows` rows of `nr` samples over r in [0, 1], z in [0, 1].
pub fn field_output(nr: usize, rows: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for row in 0..rows {
        let z = row as f64 / (rows - 1).max(1) as f64;
        for col in 0..nr {
            let r = col as f64 / (nr - 1).max(1) as f64;
            lines.push(format!("{} {} {} {}", z, r, -4.0 * r, z));
        }
    }
    lines
}

/// Write an executable shell script. Unix only.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// In-memory log sink for asserting on emitted events.
///
/// The subscriber is installed per thread, so only work that runs on the
/// calling thread (a single-worker pool) is captured.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with every event on this thread written to the capture.
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines logged at `level` (e.g. "WARN") that contain `message`.
    pub fn lines_with(&self, level: &str, message: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(message))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
