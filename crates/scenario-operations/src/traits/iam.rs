use async_trait::async_trait;
use scenario_core::Result;

use crate::types::RoleInfo;

#[async_trait]
pub trait IamProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns a not-found service error if the role does not exist.
    async fn get_role(&self, role_name: &str) -> Result<RoleInfo>;

    /// # Errors
    ///
    /// Returns an error if the role already exists or the policy is invalid.
    async fn create_role(&self, role_name: &str, assume_role_policy: &str) -> Result<RoleInfo>;

    /// # Errors
    ///
    /// Returns an error if the role cannot be deleted.
    async fn delete_role(&self, role_name: &str) -> Result<()>;
}
