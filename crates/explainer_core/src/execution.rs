//! Outcome of one render attempt.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Classification of an [`ExecutionResult`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum ExecutionStatus {
    /// Script ran and a video was found
    Rendered,
    /// Script failed; the error text is available for correction
    ScriptError,
    /// Script exited cleanly but no video was found
    MissingArtifact,
}

/// Captured result of running a script through the renderer.
///
/// The constructors keep the two outcomes apart: a failed run never carries
/// an artifact, and a clean run never carries an error.
///
/// # Examples
///
/// ```
/// use explainer_core::{ExecutionResult, ExecutionStatus};
/// use std::time::Duration;
///
/// let failed = ExecutionResult::failure(
///     "",
///     "NameError: name 'Scene' is not defined",
///     Some(1),
///     Duration::from_secs(2),
/// );
/// assert_eq!(failed.status(), ExecutionStatus::ScriptError);
/// assert!(failed.artifact_path().is_none());
///
/// let rendered = ExecutionResult::success(
///     "File ready",
///     Some("media/videos/A/480p15/A.mp4".into()),
///     Duration::from_secs(9),
/// );
/// assert_eq!(rendered.status(), ExecutionStatus::Rendered);
/// assert!(rendered.error().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ExecutionResult {
    /// Captured standard output
    stdout: String,
    /// Captured failure text when the script failed
    #[getter(skip)]
    error: Option<String>,
    /// Rendered video, when one was found
    #[getter(skip)]
    artifact_path: Option<PathBuf>,
    /// Process exit code, absent when the process was killed
    exit_code: Option<i32>,
    /// Wall-clock time spent in the renderer
    duration_ms: u64,
}

impl ExecutionResult {
    /// Clean exit, with the discovered artifact if there was one.
    pub fn success(
        stdout: impl Into<String>,
        artifact_path: Option<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self {
            stdout: stdout.into(),
            error: None,
            artifact_path,
            exit_code: Some(0),
            duration_ms: duration_millis(duration),
        }
    }

    /// Failed run with its captured error text.
    pub fn failure(
        stdout: impl Into<String>,
        error: impl Into<String>,
        exit_code: Option<i32>,
        duration: Duration,
    ) -> Self {
        Self {
            stdout: stdout.into(),
            error: Some(error.into()),
            artifact_path: None,
            exit_code,
            duration_ms: duration_millis(duration),
        }
    }

    /// Captured failure text, if the script failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rendered video, if one was found.
    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact_path.as_deref()
    }

    /// Wall-clock time spent in the renderer.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Classify this result.
    pub fn status(&self) -> ExecutionStatus {
        match (&self.error, &self.artifact_path) {
            (Some(_), _) => ExecutionStatus::ScriptError,
            (None, Some(_)) => ExecutionStatus::Rendered,
            (None, None) => ExecutionStatus::MissingArtifact,
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
