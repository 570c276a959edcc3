use async_trait::async_trait;
use scenario_core::Result;

use crate::types::ConverseRequest;

#[async_trait]
pub trait BedrockProvider: Send + Sync {
    /// Send one user turn and return the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be invoked or replies without text.
    async fn converse(&self, request: &ConverseRequest) -> Result<String>;
}
