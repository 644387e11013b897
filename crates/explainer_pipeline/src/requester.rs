//! Shared request path for the three structured requesters.

use crate::{PromptTemplate, extract_and_parse};
use explainer_core::GenerateRequest;
use explainer_interface::ExplainerDriver;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Sampling and timeout options applied to every structured request.
///
/// # Examples
///
/// ```
/// use explainer_pipeline::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::default()
///     .with_temperature(Some(0.2))
///     .with_timeout(Some(Duration::from_secs(30)));
/// assert_eq!(options.timeout(), Some(Duration::from_secs(30)));
/// assert_eq!(options.max_tokens(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RequestOptions {
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the per-request time limit.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sampling temperature.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Completion token limit.
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Per-request time limit.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Render `template`, send it once, and decode the reply as `T`.
///
/// Every failure (request building, provider error, timeout, missing or
/// malformed JSON) comes back as a message for the caller to wrap in its own
/// error kind. Nothing is retried.
pub(crate) async fn request_structured<D, T>(
    driver: &D,
    template: &PromptTemplate,
    vars: &[(&str, &str)],
    options: &RequestOptions,
) -> Result<T, String>
where
    D: ExplainerDriver + ?Sized,
    T: DeserializeOwned,
{
    let request = GenerateRequest::builder()
        .messages(template.messages(vars))
        .temperature(options.temperature)
        .max_tokens(options.max_tokens)
        .json_mode(true)
        .build()
        .map_err(|e| format!("Failed to build request: {e}"))?;

    debug!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        "Sending structured request"
    );

    let reply = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, driver.generate(&request))
            .await
            .map_err(|_| {
                error!(timeout_secs = limit.as_secs(), "Text generation timed out");
                format!("request timed out after {} seconds", limit.as_secs())
            })?,
        None => driver.generate(&request).await,
    }
    .map_err(|e| {
        error!(error = %e, "Text generation failed");
        e.to_string()
    })?;

    if reply.is_truncated() {
        debug!("Reply hit the token limit; parsing what arrived");
    }

    extract_and_parse(reply.text()).map_err(|e| e.to_string())
}
