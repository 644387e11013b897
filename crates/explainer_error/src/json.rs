//! JSON error types.

/// Structured-response decoding failure with source location.
///
/// Keeps a short preview of the offending payload so a log line is enough to
/// see what the model actually sent back.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} (payload: {:?}) at line {} in {}", message, preview, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// First characters of the payload that failed to decode
    pub preview: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

/// Characters of payload retained in [`JsonError::preview`].
const PREVIEW_CHARS: usize = 120;

impl JsonError {
    /// Create a new JsonError without a payload preview.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::JsonError;
    ///
    /// let err = JsonError::new("Invalid JSON syntax");
    /// assert!(err.message.contains("Invalid JSON"));
    /// assert!(err.preview.is_empty());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_payload(message, "")
    }

    /// Create a new JsonError keeping a truncated preview of `payload`.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::JsonError;
    ///
    /// let payload = "x".repeat(500);
    /// let err = JsonError::with_payload("expected value", &payload);
    /// assert_eq!(err.preview.chars().count(), 120);
    /// ```
    #[track_caller]
    pub fn with_payload(message: impl Into<String>, payload: &str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            preview: payload.chars().take(PREVIEW_CHARS).collect(),
            line: location.line(),
            file: location.file(),
        }
    }
}
