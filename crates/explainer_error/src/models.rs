//! Model provider errors.

/// Model provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Request never produced a response (connection, TLS, timeout)
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },

    /// Provider rejected the request for exceeding its rate limits
    #[display("Rate limit exceeded")]
    RateLimit,

    /// Requested model is unknown to the provider
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),

    /// Credential environment variable is unset or empty
    #[display("Missing API key: environment variable {} is not set", _0)]
    MissingApiKey(String),

    /// Request could not be built or was rejected as malformed
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),

    /// Response body did not match the expected wire format
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// Response carried no text content
    #[display("Provider returned an empty completion")]
    EmptyResponse,

    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error ({}): {} at {}:{}", provider, kind, file, line)]
pub struct ModelsError {
    /// Provider that raised the error (e.g. `groq`)
    pub provider: &'static str,
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::{ModelsError, ModelsErrorKind};
    ///
    /// let err = ModelsError::new("groq", ModelsErrorKind::RateLimit);
    /// assert!(err.to_string().contains("groq"));
    /// assert!(err.is_rate_limit());
    /// ```
    #[track_caller]
    pub fn new(provider: &'static str, kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            provider,
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether the provider throttled the request.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.kind, ModelsErrorKind::RateLimit)
            || matches!(self.kind, ModelsErrorKind::Api { status: 429, .. })
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
