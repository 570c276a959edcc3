use std::fmt::Debug;
use std::marker::PhantomData;

use crate::erased::{ErasedStep, StepWrapper};
use crate::scenario::Scenario;
use crate::step::ScenarioStep;

/// Builder state before the first step is added.
pub struct Empty;

/// Builder state once steps exist; `LastOutput` is what the next step gets.
pub struct HasSteps<LastOutput>(PhantomData<LastOutput>);

/// Assembles steps into a [`Scenario`], checking at compile time that they
/// chain: `then` only accepts a step whose `Input` is the previous step's
/// `Output`, and the built scenario takes the first step's input and returns
/// the last step's output.
///
/// A step that would receive the wrong data is rejected by the compiler:
///
/// ```compile_fail
/// use async_trait::async_trait;
/// use scenario_runner::{ScenarioBuilder, ScenarioStep, StepOutput};
///
/// struct CreateActivity;
/// #[async_trait]
/// impl ScenarioStep for CreateActivity {
///     type Input = String;
///     type Output = String;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "create_activity" }
///     async fn execute(&self, _: &(), name: String) -> Result<StepOutput<String>, ()> {
///         Ok(StepOutput::new(format!("arn:aws:states:::activity:{name}")))
///     }
/// }
///
/// struct WaitForPolls;
/// #[async_trait]
/// impl ScenarioStep for WaitForPolls {
///     type Input = u32;
///     type Output = u32;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "wait_for_polls" }
///     async fn execute(&self, _: &(), polls: u32) -> Result<StepOutput<u32>, ()> {
///         Ok(StepOutput::new(polls))
///     }
/// }
///
/// // An activity ARN is not a poll count.
/// let scenario = ScenarioBuilder::new()
///     .first_step(CreateActivity)
///     .then(WaitForPolls)
///     .build();
/// ```
///
/// Building with no steps gives a scenario that hands back its input.
pub struct ScenarioBuilder<Input, Output, Ctx, Err, State> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _phantom: PhantomData<(Input, Output, State)>,
}

impl<Ctx, Err> ScenarioBuilder<(), (), Ctx, Err, Empty> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// The first step fixes the scenario's input type.
    #[must_use]
    pub fn first_step<S>(
        self,
        step: S,
    ) -> ScenarioBuilder<S::Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: ScenarioStep<Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(StepWrapper::new(step)));
        ScenarioBuilder {
            steps,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn build<T>(self) -> Scenario<T, T, Ctx, Err>
    where
        T: Send + 'static,
        Err: Debug,
    {
        Scenario::from_steps(self.steps)
    }
}

impl<Ctx, Err> Default for ScenarioBuilder<(), (), Ctx, Err, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Input, CurrentOutput, Ctx, Err>
    ScenarioBuilder<Input, CurrentOutput, Ctx, Err, HasSteps<CurrentOutput>>
{
    /// Append a step that consumes the current output.
    #[must_use]
    pub fn then<S>(
        self,
        step: S,
    ) -> ScenarioBuilder<Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: ScenarioStep<Input = CurrentOutput, Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(StepWrapper::new(step)));
        ScenarioBuilder {
            steps,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn build(self) -> Scenario<Input, CurrentOutput, Ctx, Err>
    where
        Input: Send + 'static,
        CurrentOutput: Send + 'static,
        Err: Debug,
    {
        Scenario::from_steps(self.steps)
    }
}
