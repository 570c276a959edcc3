use async_trait::async_trait;
use aws_sdk_kms::Client;
use scenario_core::Result;
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::KmsProvider;

pub struct AwsKmsProvider {
    client: Client,
}

impl AwsKmsProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.kms_client())
    }
}

#[async_trait]
impl KmsProvider for AwsKmsProvider {
    async fn create_alias(&self, alias_name: &str, target_key_id: &str) -> Result<()> {
        self.client
            .create_alias()
            .alias_name(alias_name)
            .target_key_id(target_key_id)
            .send()
            .await
            .map_err(|e| service_error("CreateAlias", e))?;
        debug!(alias = alias_name, key = target_key_id, "alias created");
        Ok(())
    }

    async fn revoke_grant(&self, key_id: &str, grant_id: &str) -> Result<()> {
        self.client
            .revoke_grant()
            .key_id(key_id)
            .grant_id(grant_id)
            .send()
            .await
            .map_err(|e| service_error("RevokeGrant", e))?;
        debug!(key = key_id, grant = grant_id, "grant revoked");
        Ok(())
    }
}
