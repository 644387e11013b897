//! Trait definitions for text generation and rendering backends.

use async_trait::async_trait;
use explainer_core::{ExecutionResult, GenerateRequest, GenerateResponse};
use explainer_error::ExplainerResult;
use std::path::PathBuf;
use std::sync::Arc;

/// Core trait that all text-generation backends must implement.
///
/// One driver is constructed per process and handed by reference to every
/// requester, so implementations must be shareable across concurrent runs.
#[async_trait]
pub trait ExplainerDriver: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse>;

    /// Provider name (e.g., "groq", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama-3.3-70b-versatile").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: ExplainerDriver + ?Sized> ExplainerDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<D: ExplainerDriver + ?Sized> ExplainerDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Executes a generated script and reports what happened.
///
/// A script that fails is a normal outcome: its error text comes back inside
/// the [`ExecutionResult`] so it can be sent for correction. `Err` is reserved
/// for failures of the renderer itself, such as a missing executable.
#[async_trait]
pub trait SceneRenderer: Send + Sync {
    /// Persist `source` under `identifier` and render the scene of that name.
    async fn execute(&self, source: &str, identifier: &str) -> ExplainerResult<ExecutionResult>;

    /// Renderer name for logs (e.g., "manim").
    fn renderer_name(&self) -> &str;

    /// Directory searched for the video of `identifier`, if the renderer has one.
    fn output_dir(&self, _identifier: &str) -> Option<PathBuf> {
        None
    }
}

#[async_trait]
impl<R: SceneRenderer + ?Sized> SceneRenderer for Arc<R> {
    async fn execute(&self, source: &str, identifier: &str) -> ExplainerResult<ExecutionResult> {
        (**self).execute(source, identifier).await
    }

    fn renderer_name(&self) -> &str {
        (**self).renderer_name()
    }

    fn output_dir(&self, identifier: &str) -> Option<PathBuf> {
        (**self).output_dir(identifier)
    }
}
