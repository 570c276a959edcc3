mod bedrock;
mod dynamodb;
mod iam;
mod interaction;
mod kms;
mod mediaconvert;
mod s3;
mod sagemaker;
mod ses;
mod sqs;
mod step_functions;
mod sts;

pub use bedrock::BedrockProvider;
pub use dynamodb::DynamoDbProvider;
pub use iam::IamProvider;
pub use interaction::{InteractionProvider, PromptInput, prompt_non_empty};
pub use kms::KmsProvider;
pub use mediaconvert::MediaConvertProvider;
pub use s3::S3Provider;
pub use sagemaker::SageMakerProvider;
pub use ses::SesProvider;
pub use sqs::SqsProvider;
pub use step_functions::StepFunctionsProvider;
pub use sts::StsProvider;
