use async_trait::async_trait;
use scenario_core::Result;

use crate::types::{JobInfo, TranscodeJobSpec};

#[async_trait]
pub trait MediaConvertProvider: Send + Sync {
    /// Submit a transcoding job and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the job is rejected.
    async fn create_job(&self, spec: &TranscodeJobSpec) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the job does not exist.
    async fn get_job(&self, job_id: &str) -> Result<JobInfo>;
}
