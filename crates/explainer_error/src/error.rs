//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, JsonError, ModelsError, PipelineError, PipelineErrorKind, RenderError,
    RenderErrorKind,
};

/// Every error condition the workspace can raise.
///
/// # Examples
///
/// ```
/// use explainer_error::{ExplainerError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ExplainerError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ExplainerErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Rendering engine error
    #[from(RenderError)]
    Render(RenderError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Explainer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use explainer_error::{ExplainerError, ExplainerResult, ConfigError};
///
/// fn might_fail() -> ExplainerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Explainer Error: {}", _0)]
pub struct ExplainerError(Box<ExplainerErrorKind>);

impl ExplainerError {
    /// Create a new error from a kind.
    pub fn new(kind: ExplainerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ExplainerErrorKind {
        &self.0
    }

    /// Pipeline condition, if this is a pipeline error.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::{ExplainerError, PipelineError, PipelineErrorKind};
    ///
    /// let kind = PipelineErrorKind::GenerationFailure("no code field".into());
    /// let err = ExplainerError::from(PipelineError::new(kind.clone()));
    /// assert_eq!(err.pipeline_kind(), Some(&kind));
    /// ```
    pub fn pipeline_kind(&self) -> Option<&PipelineErrorKind> {
        match self.kind() {
            ExplainerErrorKind::Pipeline(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Render condition, if this is a rendering error.
    pub fn render_kind(&self) -> Option<&RenderErrorKind> {
        match self.kind() {
            ExplainerErrorKind::Render(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ExplainerErrorKind
impl<T> From<T> for ExplainerError
where
    T: Into<ExplainerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Explainer operations.
pub type ExplainerResult<T> = std::result::Result<T, ExplainerError>;
