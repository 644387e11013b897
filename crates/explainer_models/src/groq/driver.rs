//! Groq AI LPU Inference API driver using OpenAI-compatible client.

use crate::OpenAICompatibleClient;
use async_trait::async_trait;
use explainer_core::{GenerateRequest, GenerateResponse};
use explainer_error::{ExplainerResult, ModelsError, ModelsErrorKind, ModelsResult};
use explainer_interface::ExplainerDriver;
use std::time::Duration;
use tracing::instrument;

/// Groq chat completions endpoint.
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

const PROVIDER: &str = "groq";

/// Groq AI LPU Inference API driver.
#[derive(Debug, Clone)]
pub struct GroqDriver {
    inner: OpenAICompatibleClient,
}

impl GroqDriver {
    /// Creates a new Groq driver.
    ///
    /// Reads API token from `GROQ_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns error if API token is not set.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> ModelsResult<Self> {
        let api_key = read_api_key(GROQ_API_KEY_ENV)?;
        Ok(Self::with_api_key(api_key, model.as_ref()))
    }

    /// Creates a new Groq driver with explicit API key.
    #[instrument(skip(api_key), fields(model = %model.as_ref()))]
    pub fn with_api_key(api_key: impl Into<String>, model: impl AsRef<str>) -> Self {
        let inner = OpenAICompatibleClient::new(
            api_key,
            model.as_ref(),
            GROQ_CHAT_COMPLETIONS_URL,
            PROVIDER,
        );
        Self { inner }
    }

    /// Creates a Groq driver from the environment whose requests fail after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if API token is not set or the HTTP client cannot be built.
    #[instrument(skip_all, fields(model = %model.as_ref(), timeout_secs = timeout.as_secs()))]
    pub fn with_timeout(model: impl AsRef<str>, timeout: Duration) -> ModelsResult<Self> {
        let api_key = read_api_key(GROQ_API_KEY_ENV)?;
        let inner = OpenAICompatibleClient::with_timeout(
            api_key,
            model.as_ref(),
            GROQ_CHAT_COMPLETIONS_URL,
            PROVIDER,
            timeout,
        )
        .map_err(|e| e.into_models_error(PROVIDER))?;
        Ok(Self { inner })
    }
}

fn read_api_key(var: &str) -> ModelsResult<String> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ModelsError::new(
            PROVIDER,
            ModelsErrorKind::MissingApiKey(var.to_string()),
        )),
    }
}

#[async_trait]
impl ExplainerDriver for GroqDriver {
    #[instrument(skip(self, req), fields(provider = "groq", model = %self.inner.model_name()))]
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        self.inner
            .complete(req)
            .await
            .map_err(|e| e.into_models_error(PROVIDER).into())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
