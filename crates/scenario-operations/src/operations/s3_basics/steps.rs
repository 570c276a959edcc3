use std::marker::PhantomData;

use async_trait::async_trait;
use scenario_core::{ResourceHandle, ResourceKind};
use scenario_runner::{ScenarioStep, StepOutput};
use tracing::debug;

use super::context::S3BasicsContext;
use super::data::S3BasicsData;
use crate::OperationError;
use crate::traits::{InteractionProvider, S3Provider};

/// Object handles are identified as `<bucket>/<key>`; bucket names never
/// contain a slash.
fn object_identifier(bucket: &str, key: &str) -> String {
    format!("{bucket}/{key}")
}

pub struct CreateBucketStep<P, U> {
    _marker: PhantomData<(P, U)>,
}

impl<P, U> CreateBucketStep<P, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, U> Default for CreateBucketStep<P, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P, U> ScenarioStep for CreateBucketStep<P, U>
where
    P: S3Provider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = S3BasicsData;
    type Output = S3BasicsData;
    type Context = S3BasicsContext<P, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "create_bucket"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let bucket = &ctx.settings().bucket;
        match ctx.s3().create_bucket(bucket).await {
            Ok(()) => {
                ctx.interaction()
                    .show(&format!("Created bucket {bucket}."));
                input.bucket_created = true;
                let handle = ResourceHandle::new(ResourceKind::Bucket, bucket.clone());
                Ok(StepOutput::new(input).with_resource(handle))
            }
            // Reused buckets are not tracked, so teardown leaves them alone.
            Err(err) if err.is_already_exists() => {
                debug!(bucket, code = ?err.code, "bucket already exists");
                ctx.interaction()
                    .show(&format!("Using the existing bucket {bucket}."));
                Ok(StepOutput::new(input))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        ctx.s3().delete_bucket(&resource.identifier).await?;
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete bucket '{}'", resource.identifier)
    }
}

pub struct UploadObjectStep<P, U> {
    _marker: PhantomData<(P, U)>,
}

impl<P, U> UploadObjectStep<P, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, U> Default for UploadObjectStep<P, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P, U> ScenarioStep for UploadObjectStep<P, U>
where
    P: S3Provider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = S3BasicsData;
    type Output = S3BasicsData;
    type Context = S3BasicsContext<P, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "upload_object"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let settings = ctx.settings();
        let body = std::fs::read(&settings.file)?;
        debug!(file = %settings.file.display(), bytes = body.len(), "uploading file");

        input.etag = ctx
            .s3()
            .put_object(&settings.bucket, &settings.key, body)
            .await?;
        ctx.interaction().show(&format!(
            "Uploaded {} to s3://{}/{}.",
            settings.file.display(),
            settings.bucket,
            settings.key
        ));

        let handle = ResourceHandle::new(
            ResourceKind::Object,
            object_identifier(&settings.bucket, &settings.key),
        );
        Ok(StepOutput::new(input).with_resource(handle))
    }

    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        let settings = ctx.settings();
        let (bucket, key) = resource
            .identifier
            .split_once('/')
            .unwrap_or((settings.bucket.as_str(), settings.key.as_str()));
        ctx.s3().delete_object(bucket, key).await?;
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete object 's3://{}'", resource.identifier)
    }
}

pub struct ListBucketsStep<P, U> {
    _marker: PhantomData<(P, U)>,
}

impl<P, U> ListBucketsStep<P, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, U> Default for ListBucketsStep<P, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P, U> ScenarioStep for ListBucketsStep<P, U>
where
    P: S3Provider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = S3BasicsData;
    type Output = S3BasicsData;
    type Context = S3BasicsContext<P, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "list_buckets"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let buckets = ctx.s3().list_buckets().await?;
        ctx.interaction()
            .show(&format!("The account has {} bucket(s):", buckets.len()));
        for bucket in &buckets {
            ctx.interaction().show(&format!("\t{}", bucket.name));
        }
        input.bucket_count = buckets.len();
        Ok(StepOutput::new(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_identifier_splits_back_at_the_first_slash() {
        let id = object_identifier("reports", "2024/q3.csv");

        assert_eq!(id.split_once('/'), Some(("reports", "2024/q3.csv")));
    }
}
