//! HTTP transport errors.

/// Transport-level failure talking to a remote service, with source location.
///
/// Covers connection errors, timeouts and unreadable bodies. A response that
/// arrives with an error status is a [`crate::ModelsErrorKind::Api`] instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} (endpoint: {}) at line {} in {}", message, endpoint, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Endpoint that was being contacted, or `<unknown>`
    pub endpoint: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError for an unknown endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert_eq!(err.endpoint, "<unknown>");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::for_endpoint("<unknown>", message)
    }

    /// Create a new HttpError naming the endpoint that failed.
    #[track_caller]
    pub fn for_endpoint(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            endpoint: endpoint.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
