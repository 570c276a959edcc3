use std::path::PathBuf;

use clap::Args;
use scenario_operations::operations::{S3BasicsOperation, S3BasicsSettings};
use scenario_operations::providers::{AwsContext, AwsS3Provider, NonInteractiveProvider};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::report;
use crate::environment::non_interactive_reason;
use crate::error::{CliError, Result};
use crate::interaction::TerminalInteraction;

#[derive(Args, Debug)]
pub struct S3BasicsArgs {
    /// Bucket to create; an existing bucket of yours is reused and kept
    #[arg(long)]
    bucket: String,

    /// Local file to upload
    #[arg(long, value_name = "PATH")]
    file: PathBuf,

    /// Object key (default: the file name)
    #[arg(long)]
    key: Option<String>,

    /// Leave the bucket and object in place without asking
    #[arg(long)]
    keep_resources: bool,
}

impl S3BasicsArgs {
    fn into_settings(self) -> S3BasicsSettings {
        let mut settings = S3BasicsSettings::new(self.bucket, self.file);
        if let Some(key) = self.key {
            settings.key = key;
        }
        settings.keep_resources = self.keep_resources;
        settings
    }
}

pub(super) async fn run(
    args: S3BasicsArgs,
    aws: &AwsContext,
    cancellation: CancellationToken,
) -> Result<()> {
    let settings = args.into_settings();
    let s3 = AwsS3Provider::from_context(aws);

    let outcome = if let Some(reason) = non_interactive_reason() {
        info!(%reason, "running without prompts");
        S3BasicsOperation::new(s3, NonInteractiveProvider)
            .execute(settings, cancellation)
            .await
    } else {
        S3BasicsOperation::new(s3, TerminalInteraction)
            .execute(settings, cancellation)
            .await
    };

    report(&outcome);
    outcome.into_result().map_err(CliError::from)
}
