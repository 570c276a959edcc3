use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::SendMessageBatchRequestEntry;
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::SqsProvider;
use crate::types::{BatchFailure, BatchMessage, BatchSendResult};

pub struct AwsSqsProvider {
    client: Client,
}

impl AwsSqsProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.sqs_client())
    }
}

#[async_trait]
impl SqsProvider for AwsSqsProvider {
    async fn send_message_batch(
        &self,
        queue_url: &str,
        messages: &[BatchMessage],
    ) -> Result<BatchSendResult> {
        let entries = messages
            .iter()
            .map(|message| {
                SendMessageBatchRequestEntry::builder()
                    .id(&message.id)
                    .message_body(&message.body)
                    .build()
                    .map_err(|e| ServiceError::unexpected("SendMessageBatch", e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .send_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|e| service_error("SendMessageBatch", e))?;

        let result = BatchSendResult {
            successful: output
                .successful()
                .iter()
                .map(|entry| (entry.id().to_string(), entry.message_id().to_string()))
                .collect(),
            failed: output
                .failed()
                .iter()
                .map(|entry| BatchFailure {
                    id: entry.id().to_string(),
                    code: entry.code().to_string(),
                    message: entry.message().map(ToString::to_string),
                    sender_fault: entry.sender_fault(),
                })
                .collect(),
        };
        debug!(
            queue = queue_url,
            sent = result.successful.len(),
            failed = result.failed.len(),
            "message batch sent"
        );
        Ok(result)
    }
}
