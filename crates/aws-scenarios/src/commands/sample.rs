use std::path::PathBuf;

use clap::Subcommand;
use scenario_operations::operations::samples;
use scenario_operations::providers::{
    AwsBedrockProvider, AwsContext, AwsDynamoDbProvider, AwsKmsProvider, AwsMediaConvertProvider,
    AwsS3Provider, AwsSageMakerProvider, AwsSesProvider, AwsSqsProvider, AwsStsProvider,
};
use scenario_operations::types::{
    ConverseRequest, ModelSpec, ReceiptRuleSpec, TranscodeJobSpec, format_timestamp,
};

use crate::error::Result;

#[derive(Subcommand)]
pub enum SampleCommand {
    /// List the account's S3 buckets
    S3ListBuckets,

    /// Upload a local file to an S3 bucket
    S3PutObject {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },

    /// Send up to ten messages to an SQS queue in one batch
    SqsSendBatch {
        #[arg(long)]
        queue_url: String,
        /// Message body; repeat for each message
        #[arg(long = "message", required = true)]
        messages: Vec<String>,
    },

    /// Give a KMS key an alias of the form alias/<name>
    KmsCreateAlias {
        #[arg(long)]
        alias_name: String,
        #[arg(long)]
        key_id: String,
    },

    /// Revoke a grant on a KMS key
    KmsRevokeGrant {
        #[arg(long)]
        key_id: String,
        #[arg(long)]
        grant_id: String,
    },

    /// Add a receipt rule that stores incoming mail in S3
    SesCreateReceiptRule {
        #[arg(long)]
        rule_set_name: String,
        #[arg(long)]
        rule_name: String,
        #[arg(long)]
        bucket: String,
        /// Recipient address or domain; repeat for more
        #[arg(long = "recipient", required = true)]
        recipients: Vec<String>,
    },

    /// Remove a verified SES email address or domain
    SesDeleteIdentity {
        #[arg(long)]
        identity: String,
    },

    /// Get temporary credentials for a role
    StsAssumeRole {
        #[arg(long)]
        role_arn: String,
        #[arg(long, default_value = "aws-scenarios")]
        session_name: String,
    },

    /// Print every item in a DynamoDB table
    DynamodbScan {
        #[arg(long)]
        table: String,
    },

    /// Send one prompt to a Bedrock model
    BedrockConverse {
        #[arg(long, default_value = "amazon.titan-text-premier-v1:0")]
        model_id: String,
        #[arg(long)]
        prompt: String,
    },

    /// Register a SageMaker model from a container image and artifacts
    SagemakerCreateModel {
        #[arg(long)]
        model_name: String,
        #[arg(long)]
        execution_role_arn: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        model_data_url: String,
    },

    /// Start a MediaConvert job that transcodes a video to MP4
    MediaconvertCreateJob {
        #[arg(long)]
        role_arn: String,
        /// Source file, as an s3:// URL
        #[arg(long)]
        input: String,
        /// Destination prefix, as an s3:// URL
        #[arg(long)]
        output: String,
    },
}

impl SampleCommand {
    pub async fn execute(self, aws: &AwsContext) -> Result<()> {
        match self {
            Self::S3ListBuckets => {
                let s3 = AwsS3Provider::from_context(aws);
                let buckets = samples::list_buckets(&s3).await?;
                if buckets.is_empty() {
                    println!("No buckets found.");
                }
                for bucket in buckets {
                    println!("{}\t{}", bucket.name, format_timestamp(bucket.creation_date));
                }
            }
            Self::S3PutObject { bucket, key, file } => {
                let s3 = AwsS3Provider::from_context(aws);
                let etag = samples::put_object(&s3, &bucket, &key, &file).await?;
                match etag {
                    Some(etag) => println!("Uploaded s3://{bucket}/{key} (ETag {etag})"),
                    None => println!("Uploaded s3://{bucket}/{key}"),
                }
            }
            Self::SqsSendBatch {
                queue_url,
                messages,
            } => {
                let sqs = AwsSqsProvider::from_context(aws);
                let result = samples::send_message_batch(&sqs, &queue_url, &messages).await?;
                for (id, message_id) in &result.successful {
                    println!("sent\t{id}\t{message_id}");
                }
                for failure in &result.failed {
                    let fault = if failure.sender_fault { "sender" } else { "service" };
                    println!(
                        "failed\t{}\t{} ({fault} fault): {}",
                        failure.id,
                        failure.code,
                        failure.message.as_deref().unwrap_or("no details")
                    );
                }
            }
            Self::KmsCreateAlias { alias_name, key_id } => {
                let kms = AwsKmsProvider::from_context(aws);
                samples::create_alias(&kms, &alias_name, &key_id).await?;
                println!("Created alias {alias_name} for key {key_id}");
            }
            Self::KmsRevokeGrant { key_id, grant_id } => {
                let kms = AwsKmsProvider::from_context(aws);
                samples::revoke_grant(&kms, &key_id, &grant_id).await?;
                println!("Revoked grant {grant_id} on key {key_id}");
            }
            Self::SesCreateReceiptRule {
                rule_set_name,
                rule_name,
                bucket,
                recipients,
            } => {
                let ses = AwsSesProvider::from_context(aws);
                let rule = ReceiptRuleSpec {
                    rule_set_name,
                    rule_name,
                    bucket_name: bucket,
                    recipients,
                };
                samples::create_receipt_rule(&ses, &rule).await?;
                println!(
                    "Created receipt rule {} in rule set {}",
                    rule.rule_name, rule.rule_set_name
                );
            }
            Self::SesDeleteIdentity { identity } => {
                let ses = AwsSesProvider::from_context(aws);
                samples::delete_identity(&ses, &identity).await?;
                println!("Deleted identity {identity}");
            }
            Self::StsAssumeRole {
                role_arn,
                session_name,
            } => {
                let sts = AwsStsProvider::from_context(aws);
                let assumed = samples::assume_role(&sts, &role_arn, &session_name).await?;
                println!(
                    "Assumed {}",
                    assumed.assumed_role_arn.as_deref().unwrap_or(&role_arn)
                );
                println!("Access key id: {}", assumed.access_key_id);
                println!("Expires: {}", format_timestamp(assumed.expiration));
            }
            Self::DynamodbScan { table } => {
                let dynamodb = AwsDynamoDbProvider::from_context(aws);
                let items = samples::scan_table(&dynamodb, &table).await?;
                for item in &items {
                    let fields: Vec<String> = item
                        .iter()
                        .map(|(name, value)| format!("{name}={value}"))
                        .collect();
                    println!("{}", fields.join("\t"));
                }
                println!("{} item(s)", items.len());
            }
            Self::BedrockConverse { model_id, prompt } => {
                let bedrock = AwsBedrockProvider::from_context(aws);
                let reply =
                    samples::converse(&bedrock, &ConverseRequest::new(model_id, prompt)).await?;
                println!("{reply}");
            }
            Self::SagemakerCreateModel {
                model_name,
                execution_role_arn,
                image,
                model_data_url,
            } => {
                let sagemaker = AwsSageMakerProvider::from_context(aws);
                let spec = ModelSpec {
                    model_name,
                    execution_role_arn,
                    image,
                    model_data_url,
                };
                let arn = samples::create_model(&sagemaker, &spec).await?;
                println!("Created model {arn}");
            }
            Self::MediaconvertCreateJob {
                role_arn,
                input,
                output,
            } => {
                let mediaconvert = AwsMediaConvertProvider::from_context(aws);
                let spec = TranscodeJobSpec {
                    role_arn,
                    file_input: input,
                    file_output: output,
                };
                let job = samples::create_transcode_job(&mediaconvert, &spec).await?;
                println!(
                    "Job {} is {} (created {})",
                    job.id,
                    job.status,
                    format_timestamp(job.created_at)
                );
            }
        }
        Ok(())
    }
}
