use async_trait::async_trait;
use aws_sdk_sts::Client;
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::{service_error, timestamp};
use crate::traits::StsProvider;
use crate::types::AssumedRole;

pub struct AwsStsProvider {
    client: Client,
}

impl AwsStsProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.sts_client())
    }
}

#[async_trait]
impl StsProvider for AwsStsProvider {
    async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<AssumedRole> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| service_error("AssumeRole", e))?;

        let credentials = output
            .credentials()
            .ok_or_else(|| ServiceError::unexpected("AssumeRole", "response has no credentials"))?;
        debug!(role = role_arn, session = session_name, "role assumed");
        Ok(AssumedRole {
            assumed_role_arn: output.assumed_role_user().map(|user| user.arn().to_string()),
            access_key_id: credentials.access_key_id().to_string(),
            expiration: timestamp(credentials.expiration()),
        })
    }
}
