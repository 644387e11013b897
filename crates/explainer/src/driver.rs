//! Driver construction from model settings.

use explainer_error::{ExplainerResult, ModelsError, ModelsErrorKind};
use explainer_interface::ExplainerDriver;
use explainer_models::OpenAICompatibleClient;
use explainer_pipeline::ModelSettings;
use std::time::Duration;
use tracing::{debug, instrument};

/// Build the text-generation driver described by `settings`.
///
/// The API key is read from the environment variable the settings name.
/// Groq's own endpoint gets the [`GroqDriver`](explainer_models::GroqDriver)
/// when the `groq` feature is enabled; anything else goes through the generic
/// OpenAI-compatible client.
///
/// # Errors
///
/// Returns [`ModelsErrorKind::MissingApiKey`] if the key variable is unset or
/// blank, or an HTTP error if the client cannot be built.
#[instrument(skip(settings), fields(provider = %settings.provider(), model = %settings.model()))]
pub fn build_driver(
    settings: &ModelSettings,
    timeout: Option<Duration>,
) -> ExplainerResult<Box<dyn ExplainerDriver>> {
    let provider = provider_label(settings.provider());

    #[cfg(feature = "groq")]
    if settings.base_url() == explainer_models::GROQ_CHAT_COMPLETIONS_URL
        && settings.api_key_env() == explainer_models::GROQ_API_KEY_ENV
    {
        debug!("Using Groq driver");
        let driver = match timeout {
            Some(limit) => explainer_models::GroqDriver::with_timeout(settings.model(), limit)?,
            None => explainer_models::GroqDriver::new(settings.model())?,
        };
        return Ok(Box::new(driver));
    }

    let api_key = match std::env::var(settings.api_key_env()) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            return Err(ModelsError::new(
                provider,
                ModelsErrorKind::MissingApiKey(settings.api_key_env().clone()),
            )
            .into());
        }
    };

    debug!(endpoint = %settings.base_url(), "Using OpenAI-compatible client");
    let client = match timeout {
        Some(limit) => OpenAICompatibleClient::with_timeout(
            api_key,
            settings.model(),
            settings.base_url(),
            provider,
            limit,
        )
        .map_err(|e| e.into_models_error(provider))?,
        None => {
            OpenAICompatibleClient::new(api_key, settings.model(), settings.base_url(), provider)
        }
    };
    Ok(Box::new(client))
}

// Provider names end up in errors that need a 'static label.
fn provider_label(provider: &str) -> &'static str {
    match provider.to_ascii_lowercase().as_str() {
        "groq" => "groq",
        "openai" => "openai",
        "together" => "together",
        "ollama" => "ollama",
        _ => "openai-compatible",
    }
}
