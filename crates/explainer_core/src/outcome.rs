//! Final report of a pipeline run.

use crate::{CorrectionResult, ExecutionResult};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Terminal state of a run that was not aborted by an error.
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
pub enum RunStatus {
    /// A video was rendered
    Succeeded,
    /// Correction budget ran out with the script still failing
    Failed,
}

/// One execution attempt and the correction it triggered, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AttemptRecord {
    /// Attempt number, starting at 1
    attempt: u32,
    /// What the renderer reported
    execution: ExecutionResult,
    /// Replacement requested after this attempt failed
    #[getter(skip)]
    correction: Option<CorrectionResult>,
}

impl AttemptRecord {
    /// Record an attempt.
    pub fn new(attempt: u32, execution: ExecutionResult) -> Self {
        Self {
            attempt,
            execution,
            correction: None,
        }
    }

    /// Record the correction that followed this attempt.
    pub fn set_correction(&mut self, correction: CorrectionResult) {
        self.correction = Some(correction);
    }

    /// Replacement requested after this attempt failed.
    pub fn correction(&self) -> Option<&CorrectionResult> {
        self.correction.as_ref()
    }
}

/// Everything a caller needs to know about a finished run.
///
/// # Examples
///
/// ```
/// use explainer_core::{AttemptRecord, ExecutionResult, RunOutcome, RunStatus};
/// use std::time::Duration;
///
/// let last = ExecutionResult::success("", Some("out.mp4".into()), Duration::from_secs(1));
/// let outcome = RunOutcome::builder()
///     .identifier("WhyIsTheSkyBlue")
///     .final_source("from manim import *")
///     .plan("Scene 1 ...")
///     .last_execution(last.clone())
///     .attempts(1u32)
///     .status(RunStatus::Succeeded)
///     .history(vec![AttemptRecord::new(1, last)])
///     .build()
///     .unwrap();
///
/// assert!(outcome.succeeded());
/// assert_eq!(outcome.video().map(|p| p.to_str().unwrap()), Some("out.mp4"));
/// assert_eq!(outcome.corrections(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct RunOutcome {
    /// Scene identifier used for files and class name
    identifier: String,
    /// Last script that was executed
    final_source: String,
    /// Storyboard narrative the script was generated from
    plan: String,
    /// Result of the last execution
    last_execution: ExecutionResult,
    /// Execution attempts consumed
    attempts: u32,
    /// How the run ended
    status: RunStatus,
    /// Every attempt, in order
    history: Vec<AttemptRecord>,
    /// When the run started
    #[builder(default = "Utc::now()")]
    started_at: DateTime<Utc>,
    /// When the run finished
    #[builder(default = "Utc::now()")]
    finished_at: DateTime<Utc>,
}

impl RunOutcome {
    /// Creates a new builder for `RunOutcome`.
    pub fn builder() -> RunOutcomeBuilder {
        RunOutcomeBuilder::default()
    }

    /// Whether a video was produced.
    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    /// Rendered video, present only on success.
    pub fn video(&self) -> Option<&Path> {
        match self.status {
            RunStatus::Succeeded => self.last_execution.artifact_path(),
            RunStatus::Failed => None,
        }
    }

    /// Last captured script error, verbatim.
    pub fn last_error(&self) -> Option<&str> {
        self.last_execution.error()
    }

    /// Number of correction requests made during the run.
    pub fn corrections(&self) -> usize {
        self.history
            .iter()
            .filter(|record| record.correction().is_some())
            .count()
    }
}
