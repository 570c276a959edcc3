use async_trait::async_trait;
use scenario_core::Result;

use crate::types::{BatchMessage, BatchSendResult};

#[async_trait]
pub trait SqsProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the whole batch is rejected. Failures of single
    /// messages are reported in the result instead.
    async fn send_message_batch(
        &self,
        queue_url: &str,
        messages: &[BatchMessage],
    ) -> Result<BatchSendResult>;
}
