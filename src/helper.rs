//! External helper invocation.
//!
//! The compiled extraction helpers write their payload to stderr; stdout is
//! unused and discarded. stderr is drained on a reader thread while the child
//! is polled, so a large payload cannot stall the helper on a full pipe.
//! The timeout covers both the child's exit and the end of its stderr: a
//! background process that inherited the pipe cannot hold a run open.
//!
//! # Design
//!
//! - `HelperRunner` is the seam between the pipelines and the process layer
//! - `ProcessRunner` spawns real processes with an optional bounded wait
//! - A nonzero exit is always surfaced as `HelperProcessFailure`, never retried

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::interrupt::Interrupt;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs an extraction helper and returns its diagnostic-stream lines.
///
/// Implementors must be thread-safe as they are shared by every worker.
pub trait HelperRunner: Send + Sync {
    /// Run `program` with positional `args` and return its stderr lines.
    fn run(&self, program: &Path, args: &[String]) -> PipelineResult<Vec<String>>;
}

/// Helper runner backed by `std::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
    interrupt: Interrupt,
}

impl ProcessRunner {
    /// Create a runner. `None` waits for the helper indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            interrupt: Interrupt::default(),
        }
    }

    /// Kill running helpers once `interrupt` is triggered.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl HelperRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> PipelineResult<Vec<String>> {
        run_helper(program, args, self.timeout, &self.interrupt)
    }
}

/// Run a helper synchronously and return its stderr split into lines.
pub fn run_helper(
    program: &Path,
    args: &[String],
    timeout: Option<Duration>,
    interrupt: &Interrupt,
) -> PipelineResult<Vec<String>> {
    if interrupt.is_triggered() {
        return Err(PipelineError::Interrupted);
    }

    let command = command_line(program, args);
    debug!(command = %command, "Running helper");

    let start = Instant::now();
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PipelineError::HelperSpawn {
            command: command.clone(),
            source,
        })?;

    let (tx, rx) = mpsc::channel();
    if let Some(mut stderr) = child.stderr.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    }

    // On the error returns below the reader is left detached: a grandchild
    // of the helper may still hold the write end of the pipe.
    let waited = wait_with_timeout(&mut child, start, timeout, interrupt)
        .and_then(|status| collect_stderr(&rx, start, timeout, interrupt).map(|buf| (status, buf)));
    let (status, stderr) = match waited {
        Ok(done) => done,
        Err(WaitError::TimedOut(limit)) => {
            return Err(PipelineError::HelperTimeout {
                command,
                timeout: limit,
            })
        }
        Err(WaitError::Interrupted) => return Err(PipelineError::Interrupted),
        Err(WaitError::Io(source)) => {
            return Err(PipelineError::Io {
                path: program.to_path_buf(),
                source,
            })
        }
    };
    let stderr = String::from_utf8_lossy(&stderr);

    if !status.success() {
        return Err(PipelineError::HelperProcessFailure {
            command,
            code: status.code().unwrap_or(-1),
            stderr: stderr.into_owned(),
        });
    }

    Ok(stderr.lines().map(str::to_owned).collect())
}

/// Format a float argument the way the helpers expect it (`4.0`, `0.001`).
pub fn float_arg(value: f64) -> String {
    format!("{:?}", value)
}

/// Render a command for logs and error messages.
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

enum WaitError {
    TimedOut(Duration),
    Interrupted,
    Io(std::io::Error),
}

/// Wait for the child, killing and reaping it on timeout or interruption.
///
/// The poll interval starts at 1ms and doubles up to 50ms, so short helper
/// runs are not padded by a fixed sleep.
fn wait_with_timeout(
    child: &mut Child,
    start: Instant,
    timeout: Option<Duration>,
    interrupt: &Interrupt,
) -> Result<ExitStatus, WaitError> {
    let mut poll_interval = MIN_POLL_INTERVAL;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if interrupt.is_triggered() {
                    kill_and_reap(child);
                    return Err(WaitError::Interrupted);
                }
                if let Some(limit) = timeout {
                    if start.elapsed() >= limit {
                        kill_and_reap(child);
                        return Err(WaitError::TimedOut(limit));
                    }
                }
                thread::sleep(poll_interval);
                poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
            }
            Err(e) => return Err(WaitError::Io(e)),
        }
    }
}

/// Wait for the reader thread to hand over the full stderr payload.
///
/// The pipe only closes once every process holding it has exited, so this
/// shares the helper's time budget.
fn collect_stderr(
    rx: &Receiver<Vec<u8>>,
    start: Instant,
    timeout: Option<Duration>,
    interrupt: &Interrupt,
) -> Result<Vec<u8>, WaitError> {
    loop {
        let remaining = timeout.map(|limit| limit.saturating_sub(start.elapsed()));
        let wait = remaining.map_or(MAX_POLL_INTERVAL, |left| left.min(MAX_POLL_INTERVAL));
        match rx.recv_timeout(wait) {
            Ok(buf) => return Ok(buf),
            // No stderr handle was taken
            Err(RecvTimeoutError::Disconnected) => return Ok(Vec::new()),
            Err(RecvTimeoutError::Timeout) => {
                if let (Some(limit), Some(left)) = (timeout, remaining) {
                    if left <= wait {
                        return Err(WaitError::TimedOut(limit));
                    }
                }
                if interrupt.is_triggered() {
                    return Err(WaitError::Interrupted);
                }
            }
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
