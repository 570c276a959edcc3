use scenario_core::ResourceHandle;
use scenario_runner::ScenarioResult;

use crate::error::{CompensationFailure, OperationError};

/// What happened during one run of a scenario whose final data is `D`.
#[derive(Debug)]
pub struct ScenarioOutcome<D> {
    /// Final scenario data when every step succeeded.
    pub data: Option<D>,
    /// Why the scenario stopped early, if it did.
    pub failure: Option<OperationError>,
    pub completed_steps: Vec<String>,
    /// Rendered audit log of steps and compensations.
    pub audit_summary: String,
    pub cleanup_failures: Vec<CompensationFailure>,
    /// Resources left in place because teardown was skipped.
    pub kept_resources: Vec<ResourceHandle>,
}

impl<D> ScenarioOutcome<D> {
    pub(crate) fn from_result(result: ScenarioResult<D, OperationError>) -> Self {
        let completed_steps = result.completed_steps().to_vec();
        let audit_summary = result.audit_log().summary();
        let kept_resources = result
            .tracked_resources()
            .all_tracked()
            .cloned()
            .collect();
        let (outcome, compensation_errors) = result.finish();

        let (data, failure) = match outcome {
            Ok(data) => (Some(data), None),
            Err(failure) => (None, Some(OperationError::from(failure))),
        };

        Self {
            data,
            failure,
            completed_steps,
            audit_summary,
            cleanup_failures: compensation_errors
                .into_iter()
                .map(CompensationFailure::from)
                .collect(),
            kept_resources,
        }
    }

    /// The user stopped the scenario (prompt cancelled or interrupted).
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.failure
            .as_ref()
            .is_some_and(OperationError::is_cancellation)
    }

    /// Collapse into a single result. A cancelled run counts as success.
    ///
    /// # Errors
    ///
    /// Returns the step failure, or [`OperationError::CleanupIncomplete`] if
    /// the scenario itself succeeded but some compensation did not.
    pub fn into_result(self) -> crate::Result<()> {
        match self.failure {
            Some(failure) if !failure.is_cancellation() => return Err(failure),
            _ => {}
        }
        if !self.cleanup_failures.is_empty() {
            return Err(OperationError::CleanupIncomplete {
                failures: self.cleanup_failures,
            });
        }
        Ok(())
    }
}
