use std::collections::HashMap;
use std::fmt::Debug;

use scenario_core::ResourceKey;

use crate::audit::ScenarioAuditLog;
use crate::error::{CompensationError, ScenarioError};
use crate::tracker::ResourceTracker;

/// Outcome of one scenario run.
///
/// A failed or cancelled run has already been compensated when it is
/// returned. A successful run still holds its resources; pass it to
/// [`Scenario::teardown`](crate::Scenario::teardown) to release them.
#[derive(Debug)]
pub struct ScenarioResult<Output, Err: Debug> {
    pub(crate) completed_steps: Vec<String>,
    pub(crate) output: Option<Output>,
    pub(crate) failure: Option<ScenarioError<Err>>,
    pub(crate) compensation_errors: Vec<CompensationError<Err>>,
    pub(crate) audit: ScenarioAuditLog,
    pub(crate) tracker: ResourceTracker,
    pub(crate) owners: HashMap<ResourceKey, usize>,
}

impl<Output, Err: Debug> ScenarioResult<Output, Err> {
    pub(crate) fn new() -> Self {
        Self {
            completed_steps: Vec::new(),
            output: None,
            failure: None,
            compensation_errors: Vec::new(),
            audit: ScenarioAuditLog::new(),
            tracker: ResourceTracker::new(),
            owners: HashMap::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Names of the steps whose action succeeded, in execution order.
    #[must_use]
    pub fn completed_steps(&self) -> &[String] {
        &self.completed_steps
    }

    #[must_use]
    pub fn failure(&self) -> Option<&ScenarioError<Err>> {
        self.failure.as_ref()
    }

    #[must_use]
    pub fn output(&self) -> Option<&Output> {
        self.output.as_ref()
    }

    /// Compensations that failed, in the order they were attempted.
    #[must_use]
    pub fn compensation_errors(&self) -> &[CompensationError<Err>] {
        &self.compensation_errors
    }

    #[must_use]
    pub fn audit_log(&self) -> &ScenarioAuditLog {
        &self.audit
    }

    /// Resources that have not been compensated yet.
    #[must_use]
    pub fn tracked_resources(&self) -> &ResourceTracker {
        &self.tracker
    }

    /// Split into the final output (or the reason the scenario stopped) and
    /// the compensations that failed along the way.
    pub fn finish(self) -> (Result<Output, ScenarioError<Err>>, Vec<CompensationError<Err>>) {
        let outcome = match (self.failure, self.output) {
            (Some(failure), _) => Err(failure),
            (None, Some(output)) => Ok(output),
            (None, None) => unreachable!("successful scenario always has an output"),
        };
        (outcome, self.compensation_errors)
    }

    /// Convert into the final output, or the reason the scenario stopped.
    ///
    /// # Errors
    ///
    /// Returns the scenario's failure if it did not complete.
    pub fn into_output(self) -> Result<Output, ScenarioError<Err>> {
        self.finish().0
    }
}
