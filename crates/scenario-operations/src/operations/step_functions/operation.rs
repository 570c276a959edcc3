use std::sync::Arc;

use scenario_runner::{Scenario, ScenarioBuilder};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::context::StepFunctionsContext;
use super::data::{StepFunctionsData, StepFunctionsSettings};
use super::steps::{
    AskUserNameStep, AwaitExecutionStep, ChatStep, CreateActivityStep, CreateStateMachineStep,
    GetOrCreateRoleStep, ListExecutionsStep, StartExecutionStep,
};
use crate::error::OperationError;
use crate::operations::ScenarioOutcome;
use crate::traits::{IamProvider, InteractionProvider, StepFunctionsProvider};

type StepFunctionsScenario<S, I, U> =
    Scenario<StepFunctionsData, StepFunctionsData, StepFunctionsContext<S, I, U>, OperationError>;

pub type StepFunctionsOutcome = ScenarioOutcome<StepFunctionsData>;

pub struct StepFunctionsOperation<S, I, U> {
    step_functions: Arc<S>,
    iam: Arc<I>,
    interaction: Arc<U>,
}

impl<S, I, U> StepFunctionsOperation<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    pub fn new(step_functions: S, iam: I, interaction: U) -> Self {
        Self {
            step_functions: Arc::new(step_functions),
            iam: Arc::new(iam),
            interaction: Arc::new(interaction),
        }
    }

    /// Build from providers the caller keeps a handle to.
    pub fn from_shared(step_functions: Arc<S>, iam: Arc<I>, interaction: Arc<U>) -> Self {
        Self {
            step_functions,
            iam,
            interaction,
        }
    }

    /// The scenario's steps, in execution order.
    #[must_use]
    pub fn build_scenario() -> StepFunctionsScenario<S, I, U> {
        ScenarioBuilder::new()
            .first_step(GetOrCreateRoleStep::<S, I, U>::new())
            .then(CreateActivityStep::<S, I, U>::new())
            .then(CreateStateMachineStep::<S, I, U>::new())
            .then(AskUserNameStep::<S, I, U>::new())
            .then(StartExecutionStep::<S, I, U>::new())
            .then(ChatStep::<S, I, U>::new())
            .then(AwaitExecutionStep::<S, I, U>::new())
            .then(ListExecutionsStep::<S, I, U>::new())
            .build()
    }

    /// Run the scenario, then tear it down unless the settings keep the
    /// resources.
    pub async fn execute(
        &self,
        settings: StepFunctionsSettings,
        cancellation: CancellationToken,
    ) -> StepFunctionsOutcome {
        let keep_resources = settings.keep_resources;
        let ctx = StepFunctionsContext::new(
            settings,
            Arc::clone(&self.step_functions),
            Arc::clone(&self.iam),
            Arc::clone(&self.interaction),
        );
        let scenario = Self::build_scenario().with_cancellation(cancellation);

        let mut result = scenario.run(&ctx, StepFunctionsData::default()).await;

        if result.is_success() {
            if keep_resources {
                info!(
                    resources = result.tracked_resources().len(),
                    "keeping scenario resources"
                );
            } else {
                self.interaction.title("Clean up resources");
                scenario.teardown(&ctx, &mut result).await;
            }
        }

        ScenarioOutcome::from_result(result)
    }
}
