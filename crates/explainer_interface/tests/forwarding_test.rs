//! Smart-pointer forwarding for the backend traits.

use async_trait::async_trait;
use explainer_core::{ExecutionResult, GenerateRequest, GenerateResponse, Message};
use explainer_error::ExplainerResult;
use explainer_interface::{ExplainerDriver, SceneRenderer};
use std::sync::Arc;
use std::time::Duration;

struct EchoDriver;

#[async_trait]
impl ExplainerDriver for EchoDriver {
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        let last = req
            .messages()
            .last()
            .map(|m| m.content().clone())
            .unwrap_or_default();
        Ok(GenerateResponse::new(last))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

struct NullRenderer;

#[async_trait]
impl SceneRenderer for NullRenderer {
    async fn execute(&self, _source: &str, identifier: &str) -> ExplainerResult<ExecutionResult> {
        Ok(ExecutionResult::success(
            identifier,
            Some(format!("{identifier}.mp4").into()),
            Duration::ZERO,
        ))
    }

    fn renderer_name(&self) -> &str {
        "null"
    }
}

#[tokio::test]
async fn test_boxed_and_shared_drivers_forward() -> anyhow::Result<()> {
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hello")])
        .build()?;

    let shared: Arc<dyn ExplainerDriver> = Arc::new(EchoDriver);
    let boxed: Box<dyn ExplainerDriver> = Box::new(EchoDriver);

    assert_eq!(shared.generate(&request).await?.text(), "hello");
    assert_eq!(boxed.generate(&request).await?.text(), "hello");
    assert_eq!(shared.provider_name(), "echo");
    assert_eq!(boxed.model_name(), "echo-1");
    Ok(())
}

#[tokio::test]
async fn test_shared_renderer_forwards() -> anyhow::Result<()> {
    let renderer: Arc<dyn SceneRenderer> = Arc::new(NullRenderer);
    let result = renderer.execute("from manim import *", "Sky").await?;

    assert_eq!(result.artifact_path().and_then(|p| p.to_str()), Some("Sky.mp4"));
    assert_eq!(renderer.renderer_name(), "null");
    Ok(())
}
