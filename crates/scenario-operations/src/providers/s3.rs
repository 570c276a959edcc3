use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use scenario_core::Result;
use tracing::debug;

use super::context::AwsContext;
use super::convert::{service_error, timestamp};
use crate::traits::S3Provider;
use crate::types::BucketInfo;

pub struct AwsS3Provider {
    client: Client,
}

impl AwsS3Provider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.s3_client())
    }
}

#[async_trait]
impl S3Provider for AwsS3Provider {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| service_error("ListBuckets", e))?;

        let buckets = output
            .buckets()
            .iter()
            .filter_map(|bucket| {
                Some(BucketInfo {
                    name: bucket.name()?.to_string(),
                    creation_date: bucket.creation_date().and_then(timestamp),
                })
            })
            .collect::<Vec<_>>();
        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| service_error("CreateBucket", e))?;
        debug!(bucket, "bucket created");
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<Option<String>> {
        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| service_error("PutObject", e))?;
        debug!(bucket, key, "object uploaded");
        Ok(output.e_tag().map(ToString::to_string))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| service_error("DeleteObject", e))?;
        debug!(bucket, key, "object deleted");
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| service_error("DeleteBucket", e))?;
        debug!(bucket, "bucket deleted");
        Ok(())
    }
}
