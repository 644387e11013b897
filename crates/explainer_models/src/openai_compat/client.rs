//! HTTP client for OpenAI-compatible chat completions endpoints.

use super::dto::{ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse, ResponseFormat};
use super::OpenAICompatError;
use async_trait::async_trait;
use explainer_core::{GenerateRequest, GenerateResponse, TokenUsage};
use explainer_error::ExplainerResult;
use explainer_interface::ExplainerDriver;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Client for any endpoint speaking the OpenAI chat completions protocol.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a client with reqwest defaults (no overall request timeout).
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token
    /// * `model` - Default model identifier
    /// * `endpoint` - Full chat completions URL
    /// * `provider` - Provider name used in logs and errors
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        Self::from_parts(Client::new(), api_key, model, endpoint, provider)
    }

    /// Creates a client whose requests fail after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
        timeout: Duration,
    ) -> Result<Self, OpenAICompatError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAICompatError::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::from_parts(client, api_key, model, endpoint, provider))
    }

    fn from_parts(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        let model = model.into();
        let endpoint = endpoint.into();
        debug!(provider, model = %model, endpoint = %endpoint, "Creating OpenAI-compatible client");
        Self {
            client,
            api_key: api_key.into(),
            model,
            endpoint,
            provider,
        }
    }

    /// Provider name used in logs and errors.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Default model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Chat completions URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one chat completion request.
    #[instrument(
        skip(self, req),
        fields(provider = self.provider, model = %self.model, messages = req.messages().len())
    )]
    pub async fn complete(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, OpenAICompatError> {
        let body = self.convert_request(req)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                OpenAICompatError::Http(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read chat completion body");
            OpenAICompatError::Http(format!("Failed to read body: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %text, "Chat completion endpoint returned error");
            return Err(Self::classify_status(status, &text, body.model()));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Failed to parse chat completion response");
            OpenAICompatError::ResponseParsing(e.to_string())
        })?;

        Self::convert_response(parsed)
    }

    /// Converts a pipeline request into the wire request.
    pub(crate) fn convert_request(
        &self,
        req: &GenerateRequest,
    ) -> Result<ChatCompletionRequest, OpenAICompatError> {
        if req.messages().is_empty() {
            return Err(OpenAICompatError::InvalidRequest(
                "Request must contain at least one message".to_string(),
            ));
        }

        let model = req.model().clone().unwrap_or_else(|| self.model.clone());
        let response_format = req.json_mode().then(ResponseFormat::json_object);

        ChatCompletionRequest::builder()
            .model(model)
            .messages(req.messages().clone())
            .max_tokens(*req.max_tokens())
            .temperature(*req.temperature())
            .response_format(response_format)
            .build()
            .map_err(|e| OpenAICompatError::Builder(e.to_string()))
    }

    /// Converts the wire response into a pipeline response.
    pub(crate) fn convert_response(
        response: ChatCompletionResponse,
    ) -> Result<GenerateResponse, OpenAICompatError> {
        let choice = response
            .choices()
            .first()
            .ok_or(OpenAICompatError::EmptyResponse)?;

        let text = choice
            .message()
            .content()
            .as_deref()
            .filter(|content| !content.trim().is_empty())
            .ok_or(OpenAICompatError::EmptyResponse)?;

        let mut converted = GenerateResponse::new(text);
        if let Some(reason) = choice.finish_reason() {
            if reason == "length" {
                warn!("Completion was truncated at the token limit");
            }
            converted = converted.with_finish_reason(reason.clone());
        }
        if let Some(usage) = response.usage() {
            debug!(
                prompt_tokens = *usage.prompt_tokens(),
                completion_tokens = *usage.completion_tokens(),
                "Token usage"
            );
            converted = converted.with_usage(TokenUsage::new(
                *usage.prompt_tokens(),
                *usage.completion_tokens(),
            ));
        }
        Ok(converted)
    }

    /// Maps a non-success status and body to an error.
    pub(crate) fn classify_status(
        status: StatusCode,
        body: &str,
        model: &str,
    ) -> OpenAICompatError {
        let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.code {
                Some(code) => format!("{} (code: {})", envelope.error.message, code),
                None => envelope.error.message,
            },
            Err(_) => body.to_string(),
        };

        match status {
            StatusCode::TOO_MANY_REQUESTS => OpenAICompatError::RateLimit,
            StatusCode::NOT_FOUND => OpenAICompatError::ModelNotFound(model.to_string()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                OpenAICompatError::InvalidRequest(message)
            }
            _ => OpenAICompatError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl ExplainerDriver for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        self.complete(req)
            .await
            .map_err(|e| e.into_models_error(self.provider).into())
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explainer_core::Message;

    fn client() -> OpenAICompatibleClient {
        OpenAICompatibleClient::new(
            "key",
            "default-model",
            "http://localhost/v1/chat/completions",
            "test",
        )
    }

    #[test]
    fn convert_request_applies_json_mode_and_default_model() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("sys"), Message::user("hi")])
            .json_mode(true)
            .build()
            .unwrap();

        let body = client().convert_request(&req).unwrap();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "default-model");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn convert_request_rejects_empty_conversation() {
        let req = GenerateRequest::default();
        assert!(matches!(
            client().convert_request(&req),
            Err(OpenAICompatError::InvalidRequest(_))
        ));
    }

    #[test]
    fn convert_response_takes_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let response = OpenAICompatibleClient::convert_response(parsed).unwrap();

        assert_eq!(response.text(), "first");
        assert_eq!(response.finish_reason(), Some("stop"));
        assert_eq!(response.usage().map(|u| u.total()), Some(15));
    }

    #[test]
    fn convert_response_rejects_blank_content() {
        let body = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            OpenAICompatibleClient::convert_response(parsed),
            Err(OpenAICompatError::EmptyResponse)
        );
    }

    #[test]
    fn classify_status_reads_error_envelope() {
        let body = r#"{"error": {"message": "messages must not be empty", "type": "invalid_request_error"}}"#;
        let err = OpenAICompatibleClient::classify_status(StatusCode::BAD_REQUEST, body, "m");
        assert_eq!(
            err,
            OpenAICompatError::InvalidRequest("messages must not be empty".to_string())
        );

        let err = OpenAICompatibleClient::classify_status(StatusCode::TOO_MANY_REQUESTS, "", "m");
        assert_eq!(err, OpenAICompatError::RateLimit);

        let err =
            OpenAICompatibleClient::classify_status(StatusCode::BAD_GATEWAY, "upstream down", "m");
        assert_eq!(
            err,
            OpenAICompatError::Api {
                status: 502,
                message: "upstream down".to_string()
            }
        );
    }
}
