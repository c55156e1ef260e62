//! Error taxonomy for the extraction pipeline.
//!
//! Decoders and the helper invoker return typed failures; the pipelines
//! decide per mode whether a failure aborts the batch or becomes a gap in the
//! output.
//!
//! # Categories
//!
//! - Skips: `MissingSnapshot`, `AlreadyProduced`
//! - Helper failures: `HelperProcessFailure`, `HelperTimeout`, `HelperSpawn`, `Interrupted`
//! - Decoding failures: `MalformedGridOutput`, `UnexpectedHelperOutput`
//! - Output failures: `Render`, `Csv`, `Io`

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised while extracting, decoding or persisting a snapshot.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Snapshot not found: {}", path.display())]
    MissingSnapshot { path: PathBuf },

    #[error("Output already exists: {}", path.display())]
    AlreadyProduced { path: PathBuf },

    #[error("Command `{command}` failed with exit code {code}: {}", truncate_stderr(stderr))]
    HelperProcessFailure {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Command `{command}` timed out after {timeout:?}")]
    HelperTimeout { command: String, timeout: Duration },

    #[error("Failed to start `{command}`: {source}")]
    HelperSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted")]
    Interrupted,

    #[error("Field output has {samples} samples, which is not a whole number of rows of width {width}")]
    MalformedGridOutput { samples: usize, width: usize },

    #[error("Unexpected helper output: '{line}'")]
    UnexpectedHelperOutput { line: String },

    #[error("Failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Whether this error only means "nothing to do for this snapshot".
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingSnapshot { .. } | PipelineError::AlreadyProduced { .. }
        )
    }

    /// Whether this error came from running an extraction helper.
    pub fn is_helper_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::HelperProcessFailure { .. }
                | PipelineError::HelperTimeout { .. }
                | PipelineError::HelperSpawn { .. }
        )
    }

    pub(crate) fn unexpected(line: &str) -> Self {
        PipelineError::UnexpectedHelperOutput {
            line: line.to_string(),
        }
    }
}

/// Truncate stderr for error display.
///
/// Takes the first non-empty line and limits it to 200 characters.
fn truncate_stderr(stderr: &str) -> String {
    let first_line = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    if first_line.chars().count() <= 200 {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(200).collect();
        format!("{}...", truncated)
    }
}
