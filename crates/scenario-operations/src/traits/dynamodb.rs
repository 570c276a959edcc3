use async_trait::async_trait;
use scenario_core::Result;

use crate::types::ScanItem;

#[async_trait]
pub trait DynamoDbProvider: Send + Sync {
    /// Read every item of `table_name`, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    async fn scan(&self, table_name: &str) -> Result<Vec<ScanItem>>;
}
