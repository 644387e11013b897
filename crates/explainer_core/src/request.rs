//! Request and response types for text generation.

use crate::Message;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Text generation request.
///
/// # Examples
///
/// ```
/// use explainer_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![
///         Message::system("You are a Manim expert."),
///         Message::user("Plan the scene for: gradient descent"),
///     ])
///     .max_tokens(Some(4096u32))
///     .json_mode(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 2);
/// assert_eq!(*request.max_tokens(), Some(4096));
/// assert!(request.json_mode());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier overriding the driver default
    #[builder(default)]
    model: Option<String>,
    /// Ask the provider to constrain output to a JSON object
    #[builder(default)]
    #[getter(skip)]
    json_mode: bool,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Whether the provider should constrain output to a JSON object.
    pub fn json_mode(&self) -> bool {
        self.json_mode
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters)]
pub struct TokenUsage {
    /// Tokens in the prompt
    prompt_tokens: u64,
    /// Tokens in the completion
    completion_tokens: u64,
}

impl TokenUsage {
    /// Create a usage record.
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Prompt plus completion tokens.
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Text generation response.
///
/// # Examples
///
/// ```
/// use explainer_core::{GenerateResponse, TokenUsage};
///
/// let response = GenerateResponse::new("{\"scene\": \"...\"}")
///     .with_usage(TokenUsage::new(120, 48));
///
/// assert!(response.text().starts_with('{'));
/// assert_eq!(response.usage().map(|u| u.total()), Some(168));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// Generated text
    text: String,
    /// Provider's reason for stopping, if reported
    #[getter(skip)]
    finish_reason: Option<String>,
    /// Token usage, if reported
    #[getter(skip)]
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Response carrying only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            usage: None,
        }
    }

    /// Attach the provider's finish reason.
    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }

    /// Attach token usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Provider's reason for stopping, if reported.
    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    /// Token usage, if reported.
    pub fn usage(&self) -> Option<&TokenUsage> {
        self.usage.as_ref()
    }

    /// Whether generation stopped because it hit the token limit.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason() == Some("length")
    }
}
