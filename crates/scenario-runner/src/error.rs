use std::fmt::Debug;

use scenario_core::{ResourceHandle, ResourceKind};
use thiserror::Error;

/// A resource with the same kind and identifier is already tracked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} '{identifier}' is already tracked")]
pub struct DuplicateResourceError {
    pub kind: ResourceKind,
    pub identifier: String,
}

/// Error from a failed compensation operation.
#[derive(Debug, Error)]
#[error("compensation failed for step '{step}' on {resource}: {description}")]
pub struct CompensationError<E> {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// The resource the compensation was acting on.
    pub resource: ResourceHandle,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Reason a scenario stopped before running all of its steps.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScenarioError<E: Debug> {
    /// A step's action failed.
    #[error("step '{step}' failed")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// The error that caused the step to fail.
        #[source]
        source: E,
    },

    /// A step reported a resource that was already tracked.
    #[error("step '{step}' reported a resource that is already tracked")]
    DuplicateResource {
        step: String,
        #[source]
        source: DuplicateResourceError,
    },

    /// Cancellation was requested before the next step started.
    #[error("scenario cancelled before step '{next_step}'")]
    Cancelled { next_step: String },
}

impl<E: Debug> ScenarioError<E> {
    /// Name of the step the scenario stopped at.
    #[must_use]
    pub fn step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } | Self::DuplicateResource { step, .. } => step,
            Self::Cancelled { next_step } => next_step,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The step's own error, if the scenario stopped because an action failed.
    #[must_use]
    pub fn step_error(&self) -> Option<&E> {
        match self {
            Self::StepFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
