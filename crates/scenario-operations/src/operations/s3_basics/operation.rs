use std::sync::Arc;

use scenario_runner::{Scenario, ScenarioBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::context::S3BasicsContext;
use super::data::{S3BasicsData, S3BasicsSettings};
use super::steps::{CreateBucketStep, ListBucketsStep, UploadObjectStep};
use crate::error::OperationError;
use crate::operations::ScenarioOutcome;
use crate::traits::{InteractionProvider, S3Provider};

type S3BasicsScenario<P, U> =
    Scenario<S3BasicsData, S3BasicsData, S3BasicsContext<P, U>, OperationError>;

pub type S3BasicsOutcome = ScenarioOutcome<S3BasicsData>;

const CLEANUP_QUESTION: &str = "Delete the bucket and object created by this run?";

pub struct S3BasicsOperation<P, U> {
    s3: Arc<P>,
    interaction: Arc<U>,
}

impl<P, U> S3BasicsOperation<P, U>
where
    P: S3Provider + 'static,
    U: InteractionProvider + 'static,
{
    pub fn new(s3: P, interaction: U) -> Self {
        Self::from_shared(Arc::new(s3), Arc::new(interaction))
    }

    /// Build from providers the caller keeps a handle to.
    pub fn from_shared(s3: Arc<P>, interaction: Arc<U>) -> Self {
        Self { s3, interaction }
    }

    #[must_use]
    pub fn build_scenario() -> S3BasicsScenario<P, U> {
        ScenarioBuilder::new()
            .first_step(CreateBucketStep::<P, U>::new())
            .then(UploadObjectStep::<P, U>::new())
            .then(ListBucketsStep::<P, U>::new())
            .build()
    }

    /// Run the scenario. Unless the settings keep the resources, ask before
    /// deleting what the run created; without anyone to ask, delete it.
    pub async fn execute(
        &self,
        settings: S3BasicsSettings,
        cancellation: CancellationToken,
    ) -> S3BasicsOutcome {
        let keep_resources = settings.keep_resources;
        let ctx = S3BasicsContext::new(
            settings,
            Arc::clone(&self.s3),
            Arc::clone(&self.interaction),
        );
        let scenario = Self::build_scenario().with_cancellation(cancellation);

        let mut result = scenario.run(&ctx, S3BasicsData::default()).await;

        if result.is_success() && !result.tracked_resources().is_empty() {
            if keep_resources {
                info!(
                    resources = result.tracked_resources().len(),
                    "keeping scenario resources"
                );
            } else if self.confirm_cleanup() {
                self.interaction.title("Clean up resources");
                scenario.teardown(&ctx, &mut result).await;
            } else {
                self.interaction
                    .show("Leaving the bucket and object in place.");
            }
        }

        ScenarioOutcome::from_result(result)
    }

    fn confirm_cleanup(&self) -> bool {
        self.interaction
            .confirm(CLEANUP_QUESTION)
            .unwrap_or_else(|err| {
                debug!(%err, "no cleanup answer, deleting resources");
                true
            })
    }
}
