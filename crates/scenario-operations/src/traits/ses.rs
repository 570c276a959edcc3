use async_trait::async_trait;
use scenario_core::Result;

use crate::types::ReceiptRuleSpec;

#[async_trait]
pub trait SesProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the rule set does not exist or the rule is invalid.
    async fn create_receipt_rule(&self, rule: &ReceiptRuleSpec) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the identity cannot be deleted.
    async fn delete_identity(&self, identity: &str) -> Result<()>;
}
