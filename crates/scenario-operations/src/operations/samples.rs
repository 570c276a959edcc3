//! Single-operation samples. Each validates its arguments, makes one service
//! call (two for transcoding) and returns the result for display.

use std::path::Path;

use tracing::debug;

use crate::error::OperationError;
use crate::traits::{
    BedrockProvider, DynamoDbProvider, KmsProvider, MediaConvertProvider, S3Provider,
    SageMakerProvider, SesProvider, SqsProvider, StsProvider,
};
use crate::types::{
    AssumedRole, BatchMessage, BatchSendResult, BucketInfo, ConverseRequest, JobInfo, ModelSpec,
    ReceiptRuleSpec, ScanItem, TranscodeJobSpec,
};
use crate::Result;

/// SQS accepts at most this many entries per batch.
pub const MAX_BATCH_SIZE: usize = 10;

const ALIAS_PREFIX: &str = "alias/";

/// # Errors
///
/// Returns an error if the buckets cannot be listed.
pub async fn list_buckets<P: S3Provider>(s3: &P) -> Result<Vec<BucketInfo>> {
    s3.list_buckets().await.map_err(Into::into)
}

/// Upload a local file. Returns the object's `ETag` when S3 reports one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the upload fails.
pub async fn put_object<P: S3Provider>(
    s3: &P,
    bucket: &str,
    key: &str,
    file: &Path,
) -> Result<Option<String>> {
    let body = std::fs::read(file)?;
    debug!(file = %file.display(), bytes = body.len(), "uploading file");
    s3.put_object(bucket, key, body).await.map_err(Into::into)
}

/// Send `bodies` as one batch, numbering the entries from zero.
///
/// # Errors
///
/// Returns an error if the batch is empty, has more than
/// [`MAX_BATCH_SIZE`] messages, or the call fails.
pub async fn send_message_batch<P: SqsProvider>(
    sqs: &P,
    queue_url: &str,
    bodies: &[String],
) -> Result<BatchSendResult> {
    if bodies.is_empty() || bodies.len() > MAX_BATCH_SIZE {
        return Err(OperationError::InvalidRequest {
            what: "SendMessageBatch",
            message: format!(
                "a batch holds 1 to {MAX_BATCH_SIZE} messages, got {}",
                bodies.len()
            ),
        });
    }
    let messages: Vec<_> = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| BatchMessage {
            id: index.to_string(),
            body: body.clone(),
        })
        .collect();
    sqs.send_message_batch(queue_url, &messages).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if `alias_name` does not start with `alias/` or the call
/// fails.
pub async fn create_alias<P: KmsProvider>(kms: &P, alias_name: &str, key_id: &str) -> Result<()> {
    if !alias_name.starts_with(ALIAS_PREFIX) || alias_name.len() == ALIAS_PREFIX.len() {
        return Err(OperationError::InvalidRequest {
            what: "CreateAlias",
            message: format!("alias name must look like 'alias/<name>', got '{alias_name}'"),
        });
    }
    kms.create_alias(alias_name, key_id).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the grant cannot be revoked.
pub async fn revoke_grant<P: KmsProvider>(kms: &P, key_id: &str, grant_id: &str) -> Result<()> {
    kms.revoke_grant(key_id, grant_id).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the rule has no recipients or the call fails.
pub async fn create_receipt_rule<P: SesProvider>(ses: &P, rule: &ReceiptRuleSpec) -> Result<()> {
    if rule.recipients.is_empty() {
        return Err(OperationError::InvalidRequest {
            what: "CreateReceiptRule",
            message: "at least one recipient is required".to_string(),
        });
    }
    ses.create_receipt_rule(rule).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the identity cannot be deleted.
pub async fn delete_identity<P: SesProvider>(ses: &P, identity: &str) -> Result<()> {
    ses.delete_identity(identity).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the role cannot be assumed.
pub async fn assume_role<P: StsProvider>(
    sts: &P,
    role_arn: &str,
    session_name: &str,
) -> Result<AssumedRole> {
    sts.assume_role(role_arn, session_name).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the table cannot be scanned.
pub async fn scan_table<P: DynamoDbProvider>(dynamodb: &P, table: &str) -> Result<Vec<ScanItem>> {
    dynamodb.scan(table).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the prompt is blank or the model call fails.
pub async fn converse<P: BedrockProvider>(
    bedrock: &P,
    request: &ConverseRequest,
) -> Result<String> {
    if request.prompt.trim().is_empty() {
        return Err(OperationError::InvalidRequest {
            what: "Converse",
            message: "prompt is empty".to_string(),
        });
    }
    bedrock.converse(request).await.map_err(Into::into)
}

/// # Errors
///
/// Returns an error if the model cannot be created.
pub async fn create_model<P: SageMakerProvider>(sagemaker: &P, spec: &ModelSpec) -> Result<String> {
    sagemaker.create_model(spec).await.map_err(Into::into)
}

/// Submit a transcoding job and read back its initial state.
///
/// # Errors
///
/// Returns an error if either location is not an `s3://` URL or a call fails.
pub async fn create_transcode_job<P: MediaConvertProvider>(
    mediaconvert: &P,
    spec: &TranscodeJobSpec,
) -> Result<JobInfo> {
    for (label, url) in [("input", &spec.file_input), ("output", &spec.file_output)] {
        if !url.starts_with("s3://") {
            return Err(OperationError::InvalidRequest {
                what: "CreateJob",
                message: format!("{label} must be an s3:// URL, got '{url}'"),
            });
        }
    }
    let job_id = mediaconvert.create_job(spec).await?;
    mediaconvert.get_job(&job_id).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockData, MockS3, MockSecurity, MockSqs};

    #[tokio::test]
    async fn batch_numbers_entries_and_reports_partial_failure() {
        let sqs = MockSqs::new().rejecting(["1"]);
        let bodies = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let result = send_message_batch(&sqs, "https://queue", &bodies)
            .await
            .expect("batch accepted");

        assert_eq!(result.successful.len(), 2);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].id, "1");
        assert_eq!(sqs.sent()[1].1.body, "c");
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_without_a_call() {
        let sqs = MockSqs::new();
        let bodies = vec!["m".to_string(); MAX_BATCH_SIZE + 1];

        let err = send_message_batch(&sqs, "https://queue", &bodies)
            .await
            .expect_err("too many messages");

        assert!(matches!(err, OperationError::InvalidRequest { .. }));
        assert!(sqs.sent().is_empty());
    }

    #[tokio::test]
    async fn alias_requires_prefix() {
        let kms = MockSecurity::new();

        assert!(create_alias(&kms, "my-key", "key-1").await.is_err());
        assert!(create_alias(&kms, "alias/", "key-1").await.is_err());
        create_alias(&kms, "alias/my-key", "key-1")
            .await
            .expect("valid alias");

        assert_eq!(kms.calls(), ["CreateAlias"]);
    }

    #[tokio::test]
    async fn receipt_rule_needs_recipients() {
        let ses = MockSecurity::new();
        let rule = ReceiptRuleSpec {
            rule_set_name: "set".to_string(),
            rule_name: "rule".to_string(),
            bucket_name: "mail".to_string(),
            recipients: Vec::new(),
        };

        let err = create_receipt_rule(&ses, &rule).await.expect_err("no recipients");

        assert!(err.to_string().contains("recipient"));
        assert!(ses.calls().is_empty());
    }

    #[tokio::test]
    async fn service_failure_surfaces_as_service_error() {
        let sts = MockSecurity::new().failing_on("AssumeRole");

        let err = assume_role(&sts, "arn:aws:iam::1:role/r", "s")
            .await
            .expect_err("injected failure");

        let service = err.service_error().expect("service error");
        assert_eq!(service.code.as_deref(), Some("MockFailure"));
    }

    #[tokio::test]
    async fn put_object_uploads_file_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"hello").expect("write file");
        let s3 = MockS3::new().with_bucket("bucket");

        let etag = put_object(&s3, "bucket", "greeting.txt", &file)
            .await
            .expect("upload");

        assert!(etag.is_some());
        assert_eq!(s3.object("bucket", "greeting.txt").as_deref(), Some(&b"hello"[..]));
    }

    #[tokio::test]
    async fn missing_upload_file_is_an_io_error() {
        let s3 = MockS3::new().with_bucket("bucket");

        let err = put_object(&s3, "bucket", "k", Path::new("/nonexistent/file"))
            .await
            .expect_err("missing file");

        assert!(matches!(err, OperationError::Io(_)));
        assert!(s3.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_is_not_sent() {
        let bedrock = MockData::new().with_reply("hi");

        let err = converse(&bedrock, &ConverseRequest::new("model", "  "))
            .await
            .expect_err("blank prompt");

        assert!(matches!(err, OperationError::InvalidRequest { .. }));
        assert!(bedrock.prompts().is_empty());
    }

    #[tokio::test]
    async fn transcode_job_reads_back_status() {
        let mediaconvert = MockData::new().with_job_status("PROGRESSING");
        let spec = TranscodeJobSpec {
            role_arn: "arn:aws:iam::1:role/mc".to_string(),
            file_input: "s3://in/video.mov".to_string(),
            file_output: "s3://out/".to_string(),
        };

        let job = create_transcode_job(&mediaconvert, &spec).await.expect("job");

        assert_eq!(job.status, "PROGRESSING");
        assert_eq!(mediaconvert.calls(), ["CreateJob", "GetJob"]);
    }

    #[tokio::test]
    async fn transcode_job_rejects_local_paths() {
        let mediaconvert = MockData::new();
        let spec = TranscodeJobSpec {
            role_arn: "r".to_string(),
            file_input: "/tmp/video.mov".to_string(),
            file_output: "s3://out/".to_string(),
        };

        assert!(create_transcode_job(&mediaconvert, &spec).await.is_err());
        assert!(mediaconvert.calls().is_empty());
    }
}
