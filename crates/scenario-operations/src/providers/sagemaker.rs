use async_trait::async_trait;
use aws_sdk_sagemaker::Client;
use aws_sdk_sagemaker::types::{ContainerDefinition, ContainerMode};
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::SageMakerProvider;
use crate::types::ModelSpec;

pub struct AwsSageMakerProvider {
    client: Client,
}

impl AwsSageMakerProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.sagemaker_client())
    }
}

#[async_trait]
impl SageMakerProvider for AwsSageMakerProvider {
    async fn create_model(&self, spec: &ModelSpec) -> Result<String> {
        let container = ContainerDefinition::builder()
            .image(&spec.image)
            .model_data_url(&spec.model_data_url)
            .mode(ContainerMode::SingleModel)
            .build();

        let output = self
            .client
            .create_model()
            .model_name(&spec.model_name)
            .execution_role_arn(&spec.execution_role_arn)
            .primary_container(container)
            .send()
            .await
            .map_err(|e| service_error("CreateModel", e))?;

        let arn = Option::<&str>::from(output.model_arn())
            .ok_or_else(|| ServiceError::unexpected("CreateModel", "response has no model ARN"))?;
        debug!(model = %spec.model_name, arn, "model created");
        Ok(arn.to_string())
    }
}
