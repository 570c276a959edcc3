use async_trait::async_trait;
use aws_sdk_iam::Client;
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::IamProvider;
use crate::types::RoleInfo;

pub struct AwsIamProvider {
    client: Client,
}

impl AwsIamProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.iam_client())
    }
}

fn role_info(operation: &str, role: Option<&aws_sdk_iam::types::Role>) -> Result<RoleInfo> {
    let role = role.ok_or_else(|| ServiceError::unexpected(operation, "response has no role"))?;
    Ok(RoleInfo {
        role_name: role.role_name().to_string(),
        arn: role.arn().to_string(),
    })
}

#[async_trait]
impl IamProvider for AwsIamProvider {
    async fn get_role(&self, role_name: &str) -> Result<RoleInfo> {
        let output = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| service_error("GetRole", e))?;
        role_info("GetRole", output.role())
    }

    async fn create_role(&self, role_name: &str, assume_role_policy: &str) -> Result<RoleInfo> {
        let output = self
            .client
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(assume_role_policy)
            .send()
            .await
            .map_err(|e| service_error("CreateRole", e))?;
        debug!(role = role_name, "IAM role created");
        role_info("CreateRole", output.role())
    }

    async fn delete_role(&self, role_name: &str) -> Result<()> {
        self.client
            .delete_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| service_error("DeleteRole", e))?;
        debug!(role = role_name, "IAM role deleted");
        Ok(())
    }
}
