use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Args;
use scenario_operations::operations::{StepFunctionsOperation, StepFunctionsSettings};
use scenario_operations::providers::{
    AwsContext, AwsIamProvider, AwsStepFunctionsProvider, NonInteractiveProvider,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::report;
use crate::environment::non_interactive_reason;
use crate::error::{CliError, Result};
use crate::interaction::TerminalInteraction;

#[derive(Args, Debug, Default)]
pub struct StepFunctionsArgs {
    /// Leave the role, activity and state machine in place afterwards
    #[arg(long)]
    keep_resources: bool,

    #[arg(long)]
    activity_name: Option<String>,

    #[arg(long)]
    state_machine_name: Option<String>,

    /// IAM role assumed by the state machine; created if missing
    #[arg(long)]
    role_name: Option<String>,

    /// State machine definition (Amazon States Language JSON)
    #[arg(long, value_name = "FILE")]
    definition: Option<PathBuf>,

    #[arg(long)]
    execution_name: Option<String>,

    /// Seconds between execution status checks
    #[arg(long, value_name = "SECONDS")]
    poll_interval: Option<u64>,

    /// Give up waiting after this many status checks
    #[arg(long)]
    max_polls: Option<u32>,
}

impl StepFunctionsArgs {
    fn apply(self, settings: &mut StepFunctionsSettings) -> Result<()> {
        let max_polls = self
            .max_polls
            .map(|polls| {
                NonZeroU32::new(polls)
                    .ok_or_else(|| CliError::Usage("--max-polls must be at least 1".to_string()))
            })
            .transpose()?;

        settings.keep_resources |= self.keep_resources;
        if let Some(name) = self.activity_name {
            settings.activity_name = name;
        }
        if let Some(name) = self.state_machine_name {
            settings.state_machine_name = name;
        }
        if let Some(name) = self.role_name {
            settings.role_name = name;
        }
        if self.definition.is_some() {
            settings.definition = self.definition;
        }
        if self.execution_name.is_some() {
            settings.execution_name = self.execution_name;
        }
        if let Some(secs) = self.poll_interval {
            settings.poll_interval_secs = secs;
        }
        if let Some(polls) = max_polls {
            settings.max_polls = polls;
        }
        Ok(())
    }
}

pub(super) async fn run(
    args: StepFunctionsArgs,
    aws: &AwsContext,
    mut settings: StepFunctionsSettings,
    cancellation: CancellationToken,
) -> Result<()> {
    args.apply(&mut settings)?;

    let step_functions = AwsStepFunctionsProvider::from_context(aws);
    let iam = AwsIamProvider::from_context(aws);

    let outcome = if let Some(reason) = non_interactive_reason() {
        info!(%reason, "running without prompts");
        StepFunctionsOperation::new(step_functions, iam, NonInteractiveProvider)
            .execute(settings, cancellation)
            .await
    } else {
        StepFunctionsOperation::new(step_functions, iam, TerminalInteraction)
            .execute(settings, cancellation)
            .await
    };

    report(&outcome);
    outcome.into_result().map_err(CliError::from)
}
