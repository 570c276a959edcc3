use async_trait::async_trait;
use scenario_core::Result;

use crate::types::BucketInfo;

#[async_trait]
pub trait S3Provider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the buckets cannot be listed.
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// # Errors
    ///
    /// Returns an error if the bucket name is taken or invalid.
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Upload `body` and return the object's entity tag, when S3 reports one.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the object cannot be deleted.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the bucket is not empty or does not exist.
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;
}
