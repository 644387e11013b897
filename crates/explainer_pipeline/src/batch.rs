//! Concurrent runs over several topics.

use crate::Orchestrator;
use derive_getters::Getters;
use explainer_core::RunOutcome;
use explainer_error::ExplainerResult;
use explainer_interface::{ExplainerDriver, SceneRenderer};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};
use uuid::Uuid;

/// Result of one topic in a batch.
#[derive(Debug, Getters)]
pub struct BatchEntry {
    /// Topic as given.
    topic: String,
    /// Namespace the run's identifier was prefixed with.
    namespace: String,
    /// Outcome, or the error that aborted the run.
    result: ExplainerResult<RunOutcome>,
}

impl BatchEntry {
    /// Whether the run finished and produced a video.
    pub fn succeeded(&self) -> bool {
        self.result.as_ref().is_ok_and(RunOutcome::succeeded)
    }

    /// Take the outcome.
    pub fn into_result(self) -> ExplainerResult<RunOutcome> {
        self.result
    }
}

/// Fresh namespace for one run: `Run` followed by eight hex digits.
///
/// # Examples
///
/// ```
/// let ns = explainer_pipeline::run_namespace();
/// assert!(ns.starts_with("Run"));
/// assert_eq!(ns.len(), 11);
/// ```
pub fn run_namespace() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("Run{}", &id[..8])
}

impl<'a, D, R> Orchestrator<'a, D, R>
where
    D: ExplainerDriver + ?Sized,
    R: SceneRenderer + ?Sized,
{
    /// Run every topic with at most `jobs` runs in flight.
    ///
    /// Each run gets its own namespace (nested under this orchestrator's, if
    /// it has one) so scripts and videos never collide. Entries come back in
    /// the order of `topics`.
    #[instrument(skip(self, topics), fields(topics = topics.len()))]
    pub async fn run_batch(
        &self,
        topics: &[String],
        max_corrections: u32,
        jobs: usize,
    ) -> Vec<BatchEntry> {
        let mut entries: Vec<(usize, BatchEntry)> = stream::iter(topics.iter().enumerate())
            .map(|(index, topic)| {
                let namespace = match self.namespace() {
                    Some(base) => format!("{}_{}", base, run_namespace()),
                    None => run_namespace(),
                };
                let run = self.scoped(namespace.clone());
                async move {
                    let result = run.run(topic, max_corrections).await;
                    info!(
                        topic = %topic,
                        namespace = %namespace,
                        ok = result.is_ok(),
                        "Batch run finished"
                    );
                    (
                        index,
                        BatchEntry {
                            topic: topic.clone(),
                            namespace,
                            result,
                        },
                    )
                }
            })
            .buffer_unordered(jobs.max(1))
            .collect()
            .await;

        entries.sort_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, entry)| entry).collect()
    }
}
