//! Command handlers.
//!
//! Each handler returns whether the command achieved what it was asked to;
//! the binary turns `false` into a non-zero exit status.

use super::OutputFormat;
use super::output::{print_batch, print_execution, print_outcome, print_plan};
use explainer::{
    ExecutionStatus, ExplainerConfig, ExplainerResult, ManimRenderer, Orchestrator, RenderError,
    RenderErrorKind, SceneRenderer, ScenePlanner, build_driver,
};
use std::path::Path;
use tracing::{info, instrument};

/// Load configuration from `path`, or from the default locations.
pub fn load_config(path: Option<&Path>) -> ExplainerResult<ExplainerConfig> {
    match path {
        Some(path) => ExplainerConfig::from_file(path),
        None => ExplainerConfig::load(),
    }
}

/// Run one topic through the whole pipeline.
#[instrument(skip(config, format))]
pub async fn run_topic(
    config: &ExplainerConfig,
    topic: &str,
    max_corrections: Option<u32>,
    namespace: Option<String>,
    format: OutputFormat,
) -> ExplainerResult<bool> {
    let driver = build_driver(config.model(), config.llm_timeout())?;
    let renderer = ManimRenderer::new(config.renderer().clone());
    let max_corrections = max_corrections.unwrap_or(*config.pipeline().max_corrections());

    let mut orchestrator = Orchestrator::new(driver.as_ref(), &renderer, config.templates())
        .with_options(config.request_options());
    if let Some(namespace) = namespace {
        orchestrator = orchestrator.with_namespace(namespace);
    }

    let outcome = orchestrator.run(topic, max_corrections).await?;
    info!(
        status = %outcome.status(),
        attempts = outcome.attempts(),
        "Run finished"
    );
    print_outcome(&outcome, format)?;
    Ok(outcome.succeeded())
}

/// Request and print a storyboard only.
#[instrument(skip(config, format))]
pub async fn plan_topic(
    config: &ExplainerConfig,
    topic: &str,
    format: OutputFormat,
) -> ExplainerResult<bool> {
    let driver = build_driver(config.model(), config.llm_timeout())?;
    let plan = ScenePlanner::new(
        driver.as_ref(),
        config.templates().plan(),
        config.request_options(),
    )
    .plan(topic)
    .await?;

    print_plan(&plan, format)?;
    Ok(true)
}

/// Render an existing script without involving the model.
#[instrument(skip(config, file, format), fields(file = %file.display()))]
pub async fn render_file(
    config: &ExplainerConfig,
    file: &Path,
    identifier: &str,
    format: OutputFormat,
) -> ExplainerResult<bool> {
    let source = tokio::fs::read_to_string(file).await.map_err(|e| {
        RenderError::new(RenderErrorKind::Io {
            path: file.display().to_string(),
            message: e.to_string(),
        })
    })?;

    let renderer = ManimRenderer::new(config.renderer().clone());
    let result = renderer.execute(&source, identifier).await?;
    print_execution(identifier, &result, format)?;
    Ok(result.status() == ExecutionStatus::Rendered)
}

/// Run several topics concurrently.
#[instrument(skip(config, topics, format), fields(topics = topics.len()))]
pub async fn run_batch(
    config: &ExplainerConfig,
    topics: &[String],
    jobs: usize,
    max_corrections: Option<u32>,
    format: OutputFormat,
) -> ExplainerResult<bool> {
    let driver = build_driver(config.model(), config.llm_timeout())?;
    let renderer = ManimRenderer::new(config.renderer().clone());
    let max_corrections = max_corrections.unwrap_or(*config.pipeline().max_corrections());

    let entries = Orchestrator::new(driver.as_ref(), &renderer, config.templates())
        .with_options(config.request_options())
        .run_batch(topics, max_corrections, jobs)
        .await;

    print_batch(&entries, format)?;
    Ok(entries.iter().all(|entry| entry.succeeded()))
}
