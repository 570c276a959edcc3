use async_trait::async_trait;
use scenario_core::Result;

use crate::types::ModelSpec;

#[async_trait]
pub trait SageMakerProvider: Send + Sync {
    /// Create a single-container model and return its ARN.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be created.
    async fn create_model(&self, spec: &ModelSpec) -> Result<String>;
}
