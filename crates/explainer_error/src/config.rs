//! Configuration error types.

/// Configuration loading or validation failure with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted configuration key at fault, when known (e.g. `renderer.program`)
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing required field");
    /// assert!(err.message.contains("Missing required"));
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ConfigError attributed to a specific configuration key.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("pipeline.max_corrections", "must be at most 10");
    /// assert_eq!(err.key.as_deref(), Some("pipeline.max_corrections"));
    /// assert!(err.message.starts_with("pipeline.max_corrections:"));
    /// ```
    #[track_caller]
    pub fn for_key(key: impl Into<String>, message: impl AsRef<str>) -> Self {
        let key = key.into();
        let mut err = Self::new(format!("{}: {}", key, message.as_ref()));
        err.key = Some(key);
        err
    }
}
