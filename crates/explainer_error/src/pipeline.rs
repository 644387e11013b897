//! Pipeline error types.

/// Fatal conditions of a plan → generate → execute → correct run.
///
/// Every variant aborts the run. Running out of correction attempts is not an
/// error; it is reported as a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Storyboard request failed or its response did not parse
    #[display("Planning failed: {}", _0)]
    PlanningFailure(String),
    /// Code generation request failed or its response did not parse
    #[display("Code generation failed: {}", _0)]
    GenerationFailure(String),
    /// Correction request failed or its response did not parse
    #[display("Correction failed on attempt {}: {}", attempt, message)]
    CorrectionFailure {
        /// Execution attempt whose error was being corrected
        attempt: u32,
        /// Underlying failure
        message: String,
    },
    /// Run report could not be assembled
    #[display("Builder error: {}", _0)]
    Builder(String),
    /// Prompt template could not be rendered
    #[display("Template '{}' failed: {}", template, message)]
    Template {
        /// Template name
        template: String,
        /// Error message
        message: String,
    },
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use explainer_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::PlanningFailure("topic is empty".into()));
/// assert!(format!("{}", err).contains("Planning failed: topic is empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
