use async_trait::async_trait;
use scenario_core::Result;

#[async_trait]
pub trait KmsProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the alias exists or the key cannot be found.
    async fn create_alias(&self, alias_name: &str, target_key_id: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the grant cannot be revoked.
    async fn revoke_grant(&self, key_id: &str, grant_id: &str) -> Result<()>;
}
