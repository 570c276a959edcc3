//! AWS SDK backed implementations of the service adapter traits.

mod bedrock;
mod context;
mod convert;
mod dynamodb;
mod iam;
mod kms;
mod mediaconvert;
mod non_interactive;
mod s3;
mod sagemaker;
mod ses;
mod sqs;
mod step_functions;
mod sts;

pub use bedrock::AwsBedrockProvider;
pub use context::{AwsContext, AwsSettings};
pub use dynamodb::AwsDynamoDbProvider;
pub use iam::AwsIamProvider;
pub use kms::AwsKmsProvider;
pub use mediaconvert::AwsMediaConvertProvider;
pub use non_interactive::NonInteractiveProvider;
pub use s3::AwsS3Provider;
pub use sagemaker::AwsSageMakerProvider;
pub use ses::AwsSesProvider;
pub use sqs::AwsSqsProvider;
pub use step_functions::AwsStepFunctionsProvider;
pub use sts::AwsStsProvider;
