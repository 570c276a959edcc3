use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message,
};
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::BedrockProvider;
use crate::types::ConverseRequest;

pub struct AwsBedrockProvider {
    client: Client,
}

impl AwsBedrockProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.bedrock_client())
    }
}

#[async_trait]
impl BedrockProvider for AwsBedrockProvider {
    async fn converse(&self, request: &ConverseRequest) -> Result<String> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.prompt.clone()))
            .build()
            .map_err(|e| ServiceError::unexpected("Converse", e.to_string()))?;

        let output = self
            .client
            .converse()
            .model_id(&request.model_id)
            .messages(message)
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(request.max_tokens)
                    .temperature(request.temperature)
                    .top_p(request.top_p)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| service_error("Converse", e))?;

        let reply = output
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| ServiceError::unexpected("Converse", "response has no message"))?;
        let text = reply
            .content()
            .iter()
            .filter_map(|block| block.as_text().ok())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        debug!(model = %request.model_id, chars = text.len(), "conversation reply received");
        Ok(text)
    }
}
