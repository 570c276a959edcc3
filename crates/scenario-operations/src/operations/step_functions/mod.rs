//! The ChatSFN walkthrough: an activity, a state machine that calls it, and
//! a console worker that answers the activity's tasks.

mod context;
mod data;
mod operation;
mod steps;

pub use context::StepFunctionsContext;
pub use data::{StepFunctionsData, StepFunctionsSettings};
pub use operation::{StepFunctionsOperation, StepFunctionsOutcome};
pub use steps::{
    ACTIVITY_ARN_PLACEHOLDER, AskUserNameStep, AwaitExecutionStep, ChatStep, CreateActivityStep,
    CreateStateMachineStep, GetOrCreateRoleStep, ListExecutionsStep, STATES_TRUST_POLICY,
    StartExecutionStep,
};
