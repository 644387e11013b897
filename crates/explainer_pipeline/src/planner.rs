//! Storyboard planning.

use crate::{PromptTemplate, RequestOptions, requester::request_structured};
use explainer_core::ScenePlan;
use explainer_error::{ExplainerResult, PipelineError, PipelineErrorKind};
use explainer_interface::ExplainerDriver;
use explainer_render::is_valid_identifier;
use tracing::{info, instrument};

/// Turns a topic into a [`ScenePlan`].
#[derive(Debug)]
pub struct ScenePlanner<'a, D: ?Sized> {
    driver: &'a D,
    template: &'a PromptTemplate,
    options: RequestOptions,
}

impl<'a, D: ExplainerDriver + ?Sized> ScenePlanner<'a, D> {
    /// Planner using `template` against `driver`.
    pub fn new(driver: &'a D, template: &'a PromptTemplate, options: RequestOptions) -> Self {
        Self {
            driver,
            template,
            options,
        }
    }

    /// Request a storyboard for `topic`.
    ///
    /// # Errors
    ///
    /// [`PipelineErrorKind::PlanningFailure`] if the topic is blank, the
    /// request fails or times out, the reply does not decode, or the planned
    /// identifier cannot be used as a class name.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn plan(&self, topic: &str) -> ExplainerResult<ScenePlan> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(planning_failure("topic must not be empty"));
        }

        let plan: ScenePlan =
            request_structured(self.driver, self.template, &[("topic", topic)], &self.options)
                .await
                .map_err(planning_failure)?;

        if plan.narrative().trim().is_empty() {
            return Err(planning_failure("plan has an empty scene description"));
        }

        let identifier = plan.identifier().trim();
        if !is_valid_identifier(identifier) {
            return Err(planning_failure(format!(
                "scene_class_name {:?} is not a valid class name",
                plan.identifier()
            )));
        }
        let plan = if identifier.len() == plan.identifier().len() {
            plan
        } else {
            plan.renamed(identifier)
        };

        info!(identifier = %plan.identifier(), "Scene planned");
        Ok(plan)
    }
}

#[track_caller]
fn planning_failure(message: impl Into<String>) -> explainer_error::ExplainerError {
    PipelineError::new(PipelineErrorKind::PlanningFailure(message.into())).into()
}
