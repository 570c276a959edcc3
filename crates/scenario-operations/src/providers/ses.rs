use async_trait::async_trait;
use aws_sdk_ses::Client;
use aws_sdk_ses::types::{ReceiptAction, ReceiptRule, S3Action, TlsPolicy};
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::SesProvider;
use crate::types::ReceiptRuleSpec;

pub struct AwsSesProvider {
    client: Client,
}

impl AwsSesProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.ses_client())
    }
}

#[async_trait]
impl SesProvider for AwsSesProvider {
    async fn create_receipt_rule(&self, rule: &ReceiptRuleSpec) -> Result<()> {
        let store = S3Action::builder()
            .bucket_name(&rule.bucket_name)
            .build()
            .map_err(|e| ServiceError::unexpected("CreateReceiptRule", e.to_string()))?;
        let receipt_rule = ReceiptRule::builder()
            .name(&rule.rule_name)
            .enabled(true)
            .scan_enabled(false)
            .tls_policy(TlsPolicy::Optional)
            .set_recipients(Some(rule.recipients.clone()))
            .actions(ReceiptAction::builder().s3_action(store).build())
            .build()
            .map_err(|e| ServiceError::unexpected("CreateReceiptRule", e.to_string()))?;

        self.client
            .create_receipt_rule()
            .rule_set_name(&rule.rule_set_name)
            .rule(receipt_rule)
            .send()
            .await
            .map_err(|e| service_error("CreateReceiptRule", e))?;
        debug!(
            rule_set = %rule.rule_set_name,
            rule = %rule.rule_name,
            "receipt rule created"
        );
        Ok(())
    }

    async fn delete_identity(&self, identity: &str) -> Result<()> {
        self.client
            .delete_identity()
            .identity(identity)
            .send()
            .await
            .map_err(|e| service_error("DeleteIdentity", e))?;
        debug!(identity, "identity deleted");
        Ok(())
    }
}
