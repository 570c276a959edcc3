use async_trait::async_trait;
use scenario_core::Result;

use crate::types::AssumedRole;

#[async_trait]
pub trait StsProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the caller may not assume the role.
    async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<AssumedRole>;
}
