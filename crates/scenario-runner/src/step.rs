use async_trait::async_trait;
use scenario_core::ResourceHandle;

/// The value a step produced, together with the resources it created.
///
/// Every reported resource is tracked by the runner and later handed back to
/// the same step's [`ScenarioStep::compensate`].
#[derive(Debug, Clone)]
pub struct StepOutput<T> {
    value: T,
    created: Vec<ResourceHandle>,
}

impl<T> StepOutput<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            created: Vec::new(),
        }
    }

    /// Report a resource created by this step.
    #[must_use]
    pub fn with_resource(mut self, resource: ResourceHandle) -> Self {
        self.created.push(resource);
        self
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn created(&self) -> &[ResourceHandle] {
        &self.created
    }

    pub fn into_parts(self) -> (T, Vec<ResourceHandle>) {
        (self.value, self.created)
    }
}

/// A step in a scenario that can be executed and compensated.
///
/// Each step transforms an input into an output. Resources the step creates
/// are reported through [`StepOutput`] and undone one by one via
/// [`compensate`](Self::compensate) if a later step fails or the caller tears
/// the scenario down.
///
/// # Type Parameters
///
/// - `Input`: Data received from the previous step (or scenario entry point)
/// - `Output`: Data produced for the next step
/// - `Context`: Shared dependencies (injected, not passed between steps)
/// - `Error`: The error type for step failures
#[async_trait]
pub trait ScenarioStep: Send + Sync {
    /// Data received from the previous step or scenario entry point.
    type Input: Send + 'static;

    /// Data produced for the next step.
    type Output: Send + 'static;

    /// Shared context providing dependencies.
    type Context: Send + Sync;

    /// Error type for step failures.
    type Error: Send;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Execute the step, transforming input into output.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails to complete.
    async fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error>;

    /// Compensate (undo) the creation of one resource this step reported.
    ///
    /// The default implementation is a no-op, suitable for steps that report
    /// resources they do not own.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        let _ = (ctx, resource);
        Ok(())
    }

    /// Human-readable description of what compensating `resource` will do.
    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("undo {} for {resource}", self.name())
    }
}
