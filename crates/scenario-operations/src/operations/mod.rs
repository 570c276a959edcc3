mod outcome;
mod s3_basics;
pub mod samples;
mod step_functions;

pub use outcome::ScenarioOutcome;
pub use s3_basics::{
    CreateBucketStep, ListBucketsStep, S3BasicsContext, S3BasicsData, S3BasicsOperation,
    S3BasicsOutcome, S3BasicsSettings, UploadObjectStep,
};
pub use step_functions::{
    ACTIVITY_ARN_PLACEHOLDER, AskUserNameStep, AwaitExecutionStep, ChatStep, CreateActivityStep,
    CreateStateMachineStep, GetOrCreateRoleStep, ListExecutionsStep, STATES_TRUST_POLICY,
    StartExecutionStep, StepFunctionsContext, StepFunctionsData, StepFunctionsOperation,
    StepFunctionsOutcome, StepFunctionsSettings,
};
