//! Explainer - topic in, animated explainer video out
//!
//! Explainer asks a language model to storyboard a topic, asks again for a
//! Manim script implementing the storyboard, renders it, and while rendering
//! fails feeds the captured error back for a corrected script, up to a fixed
//! number of corrections.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use explainer::{ExplainerConfig, ManimRenderer, Orchestrator, build_driver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExplainerConfig::load()?;
//!     let driver = build_driver(config.model(), config.llm_timeout())?;
//!     let renderer = ManimRenderer::new(config.renderer().clone());
//!
//!     let outcome = Orchestrator::new(driver.as_ref(), &renderer, config.templates())
//!         .with_options(config.request_options())
//!         .run("why is the sky blue", *config.pipeline().max_corrections())
//!         .await?;
//!
//!     println!("{} after {} attempts", outcome.status(), outcome.attempts());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `groq` - Groq driver (default)
//! - `api` - Marker gating tests that call the real provider
//!
//! # Architecture
//!
//! - `explainer_core` - Plans, scripts, execution results, run outcomes
//! - `explainer_interface` - `ExplainerDriver` and `SceneRenderer` traits
//! - `explainer_error` - Error types
//! - `explainer_models` - OpenAI-compatible client and provider drivers
//! - `explainer_render` - Manim subprocess renderer
//! - `explainer_pipeline` - Requesters, orchestrator and configuration
//!
//! This crate (`explainer`) re-exports everything for convenience.

mod driver;

pub use driver::build_driver;

// Re-export core crates
pub use explainer_core::*;
pub use explainer_error::*;
pub use explainer_interface::*;

pub use explainer_models::{OpenAICompatibleClient, OpenAICompatError};
#[cfg(feature = "groq")]
pub use explainer_models::{GROQ_API_KEY_ENV, GROQ_CHAT_COMPLETIONS_URL, GroqDriver};

pub use explainer_pipeline::{
    BatchEntry, CodeCorrector, CodeGenerator, ExplainerConfig, FieldKind, ModelSettings,
    Orchestrator, PipelineSettings, PipelineStage, PromptTemplate, RequestOptions, ScenePlanner,
    SchemaField, TemplateSet, run_namespace,
};

pub use explainer_render::{
    ManimRenderer, RenderSettings, RenderSettingsBuilder, find_latest_artifact,
    is_valid_identifier,
};
