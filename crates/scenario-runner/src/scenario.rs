use std::fmt::Debug;
use std::marker::PhantomData;

use scenario_core::ResourceHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::erased::{ErasedStep, ErasedValue};
use crate::error::{CompensationError, ScenarioError};
use crate::result::ScenarioResult;

/// A compiled scenario ready for execution.
///
/// Scenarios execute a sequence of steps, where each step's output becomes
/// the next step's input. If any step fails, every resource tracked so far
/// is compensated in reverse creation order.
pub struct Scenario<Input, Output, Ctx, Err> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    cancellation: Option<CancellationToken>,
    _phantom: PhantomData<(Input, Output)>,
}

impl<Input, Output, Ctx, Err> Scenario<Input, Output, Ctx, Err>
where
    Input: Send + 'static,
    Output: Send + 'static,
    Err: Debug,
{
    pub(crate) fn from_steps(steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>) -> Self {
        Self {
            steps,
            cancellation: None,
            _phantom: PhantomData,
        }
    }

    /// Stop before the next step once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Names of the steps in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order.
    ///
    /// On failure or cancellation the tracked resources are compensated
    /// before this returns. On success they stay tracked in the result.
    pub async fn run(&self, ctx: &Ctx, input: Input) -> ScenarioResult<Output, Err> {
        let mut result = ScenarioResult::new();

        match self.execute_steps(ctx, input, &mut result).await {
            Ok(output) => {
                info!(steps = result.completed_steps.len(), "scenario completed");
                result.output = Some(output);
            }
            Err(failure) => {
                warn!(step = failure.step(), "scenario stopped: {failure}");
                result.failure = Some(failure);
                self.compensate_tracked(ctx, &mut result).await;
            }
        }

        result
    }

    /// Compensate every resource still tracked in `result`, newest first.
    ///
    /// Each resource is visited once. Failed compensations are appended to
    /// the result's compensation errors.
    pub async fn teardown(&self, ctx: &Ctx, result: &mut ScenarioResult<Output, Err>) {
        info!(resources = result.tracker.len(), "tearing down scenario resources");
        self.compensate_tracked(ctx, result).await;
    }

    async fn execute_steps(
        &self,
        ctx: &Ctx,
        input: Input,
        result: &mut ScenarioResult<Output, Err>,
    ) -> Result<Output, ScenarioError<Err>> {
        let mut current: ErasedValue = Box::new(input);

        for (index, step) in self.steps.iter().enumerate() {
            let name = step.name();

            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                return Err(ScenarioError::Cancelled {
                    next_step: name.to_string(),
                });
            }

            info!(step = name, "running step");
            result.audit.record_start(name);

            let (output, created) = match step.execute_erased(ctx, current).await {
                Ok(parts) => parts,
                Err(source) => {
                    result.audit.record_failure();
                    return Err(ScenarioError::StepFailed {
                        step: name.to_string(),
                        source,
                    });
                }
            };

            let created_count = created.len();
            for handle in created {
                let key = handle.key();
                debug!(step = name, resource = %handle, "tracking resource");
                if let Err(source) = result.tracker.track(handle) {
                    result.audit.record_failure();
                    return Err(ScenarioError::DuplicateResource {
                        step: name.to_string(),
                        source,
                    });
                }
                result.owners.insert(key, index);
            }

            result.audit.record_success(created_count);
            result.completed_steps.push(name.to_string());
            current = output;
        }

        let output = current
            .downcast::<Output>()
            .expect("type-state builder guarantees final output type");
        Ok(*output)
    }

    async fn compensate_tracked(&self, ctx: &Ctx, result: &mut ScenarioResult<Output, Err>) {
        let pending: Vec<ResourceHandle> = result.tracker.all_tracked().cloned().collect();

        for resource in pending {
            result.tracker.untrack(&resource);
            let Some(index) = result.owners.remove(&resource.key()) else {
                continue;
            };
            let step = &self.steps[index];
            let description = step.compensation_description(&resource);

            info!(step = step.name(), resource = %resource, "{description}");

            match step.compensate_erased(ctx, &resource).await {
                Ok(()) => {
                    result
                        .audit
                        .record_compensation(index, &resource, description, true);
                }
                Err(error) => {
                    warn!(
                        step = step.name(),
                        resource = %resource,
                        error = ?error,
                        "compensation failed, continuing with remaining resources"
                    );
                    result
                        .audit
                        .record_compensation(index, &resource, description.clone(), false);
                    result.compensation_errors.push(CompensationError {
                        step: step.name().to_string(),
                        resource,
                        description,
                        error,
                    });
                }
            }
        }
    }
}
