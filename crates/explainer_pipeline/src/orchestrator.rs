//! Plan, generate, then execute and correct until the scene renders.

use crate::{CodeCorrector, CodeGenerator, RequestOptions, ScenePlanner, TemplateSet};
use chrono::{DateTime, Utc};
use explainer_core::{
    AttemptRecord, ExecutionResult, ExecutionStatus, GeneratedCode, RunOutcome, RunStatus,
    ScenePlan,
};
use explainer_error::{
    ExplainerResult, PipelineError, PipelineErrorKind, RenderError, RenderErrorKind,
};
use explainer_interface::{ExplainerDriver, SceneRenderer};
use explainer_render::is_valid_identifier;
use tracing::{debug, info, instrument, warn};

/// States a run moves through.
///
/// `Planning → Generating → Executing`, then from `Executing` to
/// `Succeeded`, `Failed`, or `Correcting` and back to `Executing`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum PipelineStage {
    /// Requesting the storyboard
    Planning,
    /// Requesting the first script
    Generating,
    /// Rendering the current script
    Executing,
    /// Requesting a replacement script
    Correcting,
    /// A video was produced
    Succeeded,
    /// Corrections ran out
    Failed,
}

impl PipelineStage {
    /// Whether the run ends in this stage.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Drives one topic through the whole pipeline.
///
/// Holds only shared references, so one driver and one renderer can serve
/// any number of concurrent runs. Give concurrent runs distinct namespaces
/// so their scripts and videos do not collide.
///
/// # Example
///
/// ```no_run
/// use explainer_pipeline::{ExplainerConfig, Orchestrator};
/// use explainer_render::ManimRenderer;
/// # use explainer_interface::ExplainerDriver;
///
/// # async fn example(driver: &dyn ExplainerDriver) -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExplainerConfig::load()?;
/// let renderer = ManimRenderer::new(config.renderer().clone());
///
/// let outcome = Orchestrator::new(driver, &renderer, config.templates())
///     .with_options(config.request_options())
///     .run("why is the sky blue", 3)
///     .await?;
///
/// if let Some(video) = outcome.video() {
///     println!("Rendered {}", video.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Orchestrator<'a, D: ?Sized, R: ?Sized> {
    driver: &'a D,
    renderer: &'a R,
    templates: &'a TemplateSet,
    options: RequestOptions,
    namespace: Option<String>,
}

impl<'a, D, R> Orchestrator<'a, D, R>
where
    D: ExplainerDriver + ?Sized,
    R: SceneRenderer + ?Sized,
{
    /// Orchestrator over `driver` and `renderer` using `templates`.
    pub fn new(driver: &'a D, renderer: &'a R, templates: &'a TemplateSet) -> Self {
        Self {
            driver,
            renderer,
            templates,
            options: RequestOptions::default(),
            namespace: None,
        }
    }

    /// Apply `options` to every text-generation request.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Prefix the planned identifier with `namespace` and an underscore.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace applied to planned identifiers, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Same orchestrator under another namespace.
    pub(crate) fn scoped(&self, namespace: String) -> Self {
        Self {
            driver: self.driver,
            renderer: self.renderer,
            templates: self.templates,
            options: self.options,
            namespace: Some(namespace),
        }
    }

    /// Run `topic` through plan, generate, and up to `max_corrections`
    /// execute/correct cycles.
    ///
    /// Running out of corrections is not an error: the outcome reports
    /// [`RunStatus::Failed`] with the last error and the last script.
    ///
    /// # Errors
    ///
    /// Planning, generation and correction failures abort the run, as do a
    /// renderer that cannot be launched and a clean render that left no
    /// video ([`RenderErrorKind::ArtifactNotFound`]).
    #[instrument(
        skip(self),
        fields(
            provider = self.driver.provider_name(),
            renderer = self.renderer.renderer_name(),
            namespace = self.namespace.as_deref()
        )
    )]
    pub async fn run(&self, topic: &str, max_corrections: u32) -> ExplainerResult<RunOutcome> {
        let started_at = Utc::now();

        enter(PipelineStage::Planning);
        let plan = ScenePlanner::new(self.driver, self.templates.plan(), self.options)
            .plan(topic)
            .await?;
        let plan = self.apply_namespace(plan)?;
        let identifier = plan.identifier().as_str();

        enter(PipelineStage::Generating);
        let mut code: GeneratedCode =
            CodeGenerator::new(self.driver, self.templates.code(), self.options)
                .generate_code(&plan)
                .await?;

        let corrector = CodeCorrector::new(self.driver, self.templates.correction(), self.options);
        let mut history: Vec<AttemptRecord> = Vec::new();
        let mut corrections = 0u32;

        loop {
            let attempt = corrections + 1;
            enter(PipelineStage::Executing);
            debug!(attempt, "Executing script");
            let execution = self.renderer.execute(code.source(), identifier).await?;

            match execution.status() {
                ExecutionStatus::Rendered => {
                    enter(PipelineStage::Succeeded);
                    history.push(AttemptRecord::new(attempt, execution.clone()));
                    return finish(
                        &plan,
                        code,
                        execution,
                        history,
                        RunStatus::Succeeded,
                        started_at,
                    );
                }
                ExecutionStatus::MissingArtifact => {
                    let searched = self
                        .renderer
                        .output_dir(identifier)
                        .map(|dir| dir.display().to_string())
                        .unwrap_or_else(|| format!("{} output", self.renderer.renderer_name()));
                    return Err(RenderError::new(RenderErrorKind::ArtifactNotFound {
                        identifier: identifier.to_string(),
                        searched,
                    })
                    .into());
                }
                ExecutionStatus::ScriptError => {
                    let error = execution.error().unwrap_or_default().to_string();
                    let mut record = AttemptRecord::new(attempt, execution.clone());

                    if corrections >= max_corrections {
                        enter(PipelineStage::Failed);
                        warn!(attempt, max_corrections, "Correction budget exhausted");
                        history.push(record);
                        return finish(
                            &plan,
                            code,
                            execution,
                            history,
                            RunStatus::Failed,
                            started_at,
                        );
                    }

                    enter(PipelineStage::Correcting);
                    warn!(attempt, "Script failed; requesting correction");
                    let correction = corrector
                        .correct(identifier, code.source(), &error, attempt)
                        .await?;
                    record.set_correction(correction.clone());
                    history.push(record);

                    code = GeneratedCode::from(correction);
                    corrections += 1;
                }
            }
        }
    }

    fn apply_namespace(&self, plan: ScenePlan) -> ExplainerResult<ScenePlan> {
        let Some(namespace) = &self.namespace else {
            return Ok(plan);
        };
        let namespaced = format!("{}_{}", namespace, plan.identifier());
        if !is_valid_identifier(&namespaced) {
            return Err(PipelineError::new(PipelineErrorKind::PlanningFailure(format!(
                "namespace {:?} does not form a valid class name",
                namespace
            )))
            .into());
        }
        debug!(identifier = %namespaced, "Applied namespace");
        Ok(plan.renamed(namespaced))
    }
}

fn enter(stage: PipelineStage) {
    info!(stage = %stage, "Pipeline stage");
}

fn finish(
    plan: &ScenePlan,
    code: GeneratedCode,
    last_execution: ExecutionResult,
    history: Vec<AttemptRecord>,
    status: RunStatus,
    started_at: DateTime<Utc>,
) -> ExplainerResult<RunOutcome> {
    let attempts = u32::try_from(history.len()).unwrap_or(u32::MAX);
    RunOutcome::builder()
        .identifier(plan.identifier().clone())
        .final_source(code.source().clone())
        .plan(plan.narrative().clone())
        .last_execution(last_execution)
        .attempts(attempts)
        .status(status)
        .history(history)
        .started_at(started_at)
        .finished_at(Utc::now())
        .build()
        .map_err(|e| PipelineError::new(PipelineErrorKind::Builder(e.to_string())).into())
}
