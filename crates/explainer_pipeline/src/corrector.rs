//! Script repair from a captured error.

use crate::{PromptTemplate, RequestOptions, requester::request_structured, strip_code_fence};
use explainer_core::CorrectionResult;
use explainer_error::{ExplainerResult, PipelineError, PipelineErrorKind};
use explainer_interface::ExplainerDriver;
use tracing::{info, instrument};

/// Asks the model to fix a failing script.
#[derive(Debug)]
pub struct CodeCorrector<'a, D: ?Sized> {
    driver: &'a D,
    template: &'a PromptTemplate,
    options: RequestOptions,
}

impl<'a, D: ExplainerDriver + ?Sized> CodeCorrector<'a, D> {
    /// Corrector using `template` against `driver`.
    pub fn new(driver: &'a D, template: &'a PromptTemplate, options: RequestOptions) -> Self {
        Self {
            driver,
            template,
            options,
        }
    }

    /// Request a replacement for `source`, which failed with `error` on
    /// execution attempt `attempt` of scene `identifier`.
    ///
    /// # Errors
    ///
    /// [`PipelineErrorKind::CorrectionFailure`] if the request fails or times
    /// out, the reply does not decode, or the replacement is empty.
    #[instrument(skip(self, source, error), fields(error_bytes = error.len()))]
    pub async fn correct(
        &self,
        identifier: &str,
        source: &str,
        error: &str,
        attempt: u32,
    ) -> ExplainerResult<CorrectionResult> {
        let vars = [("identifier", identifier), ("code", source), ("error", error)];
        let failure = |message: String| {
            PipelineError::new(PipelineErrorKind::CorrectionFailure { attempt, message })
        };

        let correction: CorrectionResult =
            request_structured(self.driver, self.template, &vars, &self.options)
                .await
                .map_err(failure)?;

        let correction = correction.map_source(strip_code_fence);
        if correction.source().trim().is_empty() {
            return Err(failure("reply contained an empty script".to_string()).into());
        }

        info!(changes = correction.changes().len(), "Correction received");
        Ok(correction)
    }
}
