mod s3_basics;
mod sample;
mod step_functions;

use clap::Subcommand;
use scenario_operations::operations::ScenarioOutcome;
use scenario_operations::providers::AwsContext;
use tokio_util::sync::CancellationToken;

use self::s3_basics::S3BasicsArgs;
use self::sample::SampleCommand;
use self::step_functions::StepFunctionsArgs;

use crate::config::Config;
use crate::error::Result;

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with a Step Functions state machine through an activity worker
    StepFunctions(StepFunctionsArgs),
    /// Create a bucket, upload a file to it and list the account's buckets
    S3Basics(S3BasicsArgs),
    /// Call a single AWS operation and print the result
    #[command(subcommand)]
    Sample(SampleCommand),
}

impl Commands {
    pub async fn execute(
        self,
        aws: &AwsContext,
        config: Config,
        cancellation: CancellationToken,
    ) -> Result<()> {
        match self {
            Self::StepFunctions(args) => {
                step_functions::run(args, aws, config.step_functions, cancellation).await
            }
            Self::S3Basics(args) => s3_basics::run(args, aws, cancellation).await,
            Self::Sample(command) => command.execute(aws).await,
        }
    }
}

/// Print the audit summary, kept resources and cleanup warnings of a run.
fn report<D>(outcome: &ScenarioOutcome<D>) {
    if !outcome.audit_summary.is_empty() {
        println!();
        println!("{}", outcome.audit_summary);
    }

    if outcome.was_cancelled() {
        println!();
        println!("Scenario cancelled.");
    }

    if !outcome.kept_resources.is_empty() {
        println!();
        println!("Kept resources:");
        for resource in &outcome.kept_resources {
            println!("  {resource}");
        }
    }

    for failure in &outcome.cleanup_failures {
        eprintln!(
            "warning: could not {} for {} ({}): {}",
            failure.description, failure.resource, failure.step, failure.error
        );
    }
}
