//! Script generation from a storyboard.

use crate::{PromptTemplate, RequestOptions, requester::request_structured, strip_code_fence};
use explainer_core::{GeneratedCode, ScenePlan};
use explainer_error::{ExplainerError, ExplainerResult, PipelineError, PipelineErrorKind};
use explainer_interface::ExplainerDriver;
use tracing::{info, instrument};

/// Turns a [`ScenePlan`] into a runnable script.
#[derive(Debug)]
pub struct CodeGenerator<'a, D: ?Sized> {
    driver: &'a D,
    template: &'a PromptTemplate,
    options: RequestOptions,
}

impl<'a, D: ExplainerDriver + ?Sized> CodeGenerator<'a, D> {
    /// Generator using `template` against `driver`.
    pub fn new(driver: &'a D, template: &'a PromptTemplate, options: RequestOptions) -> Self {
        Self {
            driver,
            template,
            options,
        }
    }

    /// Request a script implementing `plan`.
    ///
    /// # Errors
    ///
    /// [`PipelineErrorKind::GenerationFailure`] if the request fails or times
    /// out, the reply does not decode, or the script is empty.
    #[instrument(skip(self, plan), fields(identifier = %plan.identifier()))]
    pub async fn generate_code(&self, plan: &ScenePlan) -> ExplainerResult<GeneratedCode> {
        let vars = [
            ("plan", plan.narrative().as_str()),
            ("identifier", plan.identifier().as_str()),
        ];
        let code: GeneratedCode =
            request_structured(self.driver, self.template, &vars, &self.options)
                .await
                .map_err(generation_failure)?;

        let code = code.map_source(strip_code_fence);
        if code.source().trim().is_empty() {
            return Err(generation_failure("reply contained an empty script".to_string()));
        }

        info!(bytes = code.source().len(), "Script generated");
        Ok(code)
    }
}

#[track_caller]
fn generation_failure(message: String) -> ExplainerError {
    PipelineError::new(PipelineErrorKind::GenerationFailure(message)).into()
}
