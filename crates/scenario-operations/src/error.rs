use std::path::PathBuf;

use scenario_core::{ResourceHandle, ServiceError};
use scenario_runner::{CompensationError, ScenarioError};
use thiserror::Error;

/// Details about a failed compensation during scenario cleanup.
#[derive(Debug)]
pub struct CompensationFailure {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// The resource that could not be cleaned up.
    pub resource: ResourceHandle,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The error that occurred during compensation.
    pub error: Box<OperationError>,
}

impl From<CompensationError<OperationError>> for CompensationFailure {
    fn from(err: CompensationError<OperationError>) -> Self {
        Self {
            step: err.step,
            resource: err.resource,
            description: err.description,
            error: Box::new(err.error),
        }
    }
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("interaction required but running non-interactively")]
    InteractionRequired,

    #[error("failed to read state machine definition '{path}'")]
    DefinitionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state machine definition is not valid JSON")]
    DefinitionParse(#[source] serde_json::Error),

    #[error("failed to encode {what} as JSON")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("execution '{execution_arn}' still running after {polls} status checks")]
    ExecutionTimedOut { execution_arn: String, polls: u32 },

    #[error("failed to build {what} request: {message}")]
    InvalidRequest { what: &'static str, message: String },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("scenario failed at step '{step}'")]
    ScenarioFailed {
        step: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error("scenario rejected a duplicate resource in step '{step}'")]
    DuplicateResource {
        step: String,
        #[source]
        source: scenario_runner::DuplicateResourceError,
    },

    #[error("scenario cancelled before step '{next_step}'")]
    ScenarioCancelled { next_step: String },

    #[error(
        "{} compensation(s) failed; some resources may need manual cleanup",
        failures.len()
    )]
    CleanupIncomplete { failures: Vec<CompensationFailure> },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl OperationError {
    /// The service error at the root of this failure, if there is one.
    #[must_use]
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            Self::ScenarioFailed { source, .. } => source.service_error(),
            _ => None,
        }
    }

    /// Whether the user chose to stop, as opposed to something going wrong.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled | Self::ScenarioCancelled { .. } => true,
            Self::ScenarioFailed { source, .. } => source.is_cancellation(),
            _ => false,
        }
    }
}

impl From<ScenarioError<OperationError>> for OperationError {
    fn from(err: ScenarioError<OperationError>) -> Self {
        match err {
            ScenarioError::StepFailed { step, source } => Self::ScenarioFailed {
                step,
                source: Box::new(source),
            },
            ScenarioError::DuplicateResource { step, source } => {
                Self::DuplicateResource { step, source }
            }
            ScenarioError::Cancelled { next_step } => Self::ScenarioCancelled { next_step },
            _ => Self::Cancelled,
        }
    }
}
