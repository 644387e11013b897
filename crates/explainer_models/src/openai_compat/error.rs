//! Errors raised by the OpenAI-compatible client.

use explainer_error::{ModelsError, ModelsErrorKind};

/// Failure talking to an OpenAI-compatible endpoint.
///
/// Provider drivers translate these into [`ModelsError`] under their own
/// provider name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OpenAICompatError {
    /// Request never produced a response
    #[display("HTTP error: {}", _0)]
    Http(#[error(not(source))] String),
    /// Endpoint answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider message or raw body
        message: String,
    },
    /// Endpoint throttled the request
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Endpoint does not know the model
    #[display("Model not found: {}", _0)]
    ModelNotFound(#[error(not(source))] String),
    /// Endpoint rejected the request as malformed
    #[display("Invalid request: {}", _0)]
    InvalidRequest(#[error(not(source))] String),
    /// Body did not decode as a chat completion
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(#[error(not(source))] String),
    /// Completion had no text
    #[display("Empty completion")]
    EmptyResponse,
    /// Request DTO could not be built
    #[display("Builder error: {}", _0)]
    Builder(#[error(not(source))] String),
}

impl OpenAICompatError {
    /// Attribute this error to `provider`.
    #[track_caller]
    pub fn into_models_error(self, provider: &'static str) -> ModelsError {
        let kind = match self {
            Self::Http(msg) => ModelsErrorKind::Http(msg),
            Self::Api { status, message } => ModelsErrorKind::Api { status, message },
            Self::RateLimit => ModelsErrorKind::RateLimit,
            Self::ModelNotFound(model) => ModelsErrorKind::ModelNotFound(model),
            Self::InvalidRequest(msg) => ModelsErrorKind::InvalidRequest(msg),
            Self::ResponseParsing(msg) => ModelsErrorKind::ResponseParsing(msg),
            Self::EmptyResponse => ModelsErrorKind::EmptyResponse,
            Self::Builder(msg) => ModelsErrorKind::Builder(msg),
        };
        ModelsError::new(provider, kind)
    }
}
