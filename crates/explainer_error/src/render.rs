//! Rendering engine errors.

/// Conditions under which a render could not be carried out or classified.
///
/// A script that runs and fails is not an error at this level: its stderr is
/// captured in the execution result so it can be fed back for correction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenderErrorKind {
    /// Renderer process could not be started
    #[display("Failed to launch renderer '{}': {}", program, message)]
    Launch {
        /// Program that was invoked
        program: String,
        /// OS error message
        message: String,
    },

    /// Script or output directory could not be written or read
    #[display("I/O error at {}: {}", path, message)]
    Io {
        /// Path involved in the failed operation
        path: String,
        /// OS error message
        message: String,
    },

    /// Renderer exited cleanly but produced no video for the scene
    #[display("Renderer exited successfully but no artifact was found for '{}' under {}", identifier, searched)]
    ArtifactNotFound {
        /// Scene identifier that was rendered
        identifier: String,
        /// Directory that was searched
        searched: String,
    },

    /// Scene identifier is unusable as a class name and file stem
    #[display("Invalid scene identifier: {:?}", _0)]
    InvalidIdentifier(String),
}

/// Rendering error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The specific error condition
    pub kind: RenderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::{RenderError, RenderErrorKind};
    ///
    /// let err = RenderError::new(RenderErrorKind::InvalidIdentifier("../etc".into()));
    /// assert!(err.to_string().contains("Invalid scene identifier"));
    /// ```
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
