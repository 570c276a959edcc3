use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// Lifecycle state of a Step Functions execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    PendingRedrive,
    /// A status this version does not know about.
    Other(String),
}

impl ExecutionStatus {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "TIMED_OUT" => Self::TimedOut,
            "ABORTED" => Self::Aborted,
            "PENDING_REDRIVE" => Self::PendingRedrive,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::TimedOut => "TIMED_OUT",
            Self::Aborted => "ABORTED",
            Self::PendingRedrive => "PENDING_REDRIVE",
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An execution that was just started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedExecution {
    pub execution_arn: String,
    pub start_date: Option<DateTime<Utc>>,
}

/// Current state of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDescription {
    pub execution_arn: String,
    pub status: ExecutionStatus,
    pub output: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub stop_date: Option<DateTime<Utc>>,
}

/// One entry of a state machine's execution history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub name: String,
    pub execution_arn: String,
    pub status: ExecutionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub stop_date: Option<DateTime<Utc>>,
}

/// Work handed to an activity worker. `None` from the service means the
/// long poll ended without a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityTask {
    pub task_token: String,
    pub input: String,
}

/// An IAM role, whether found or newly created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub role_name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

/// One message in an SQS batch; `id` must be unique within the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchMessage {
    pub id: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: String,
    pub code: String,
    pub message: Option<String>,
    pub sender_fault: bool,
}

/// Outcome of an SQS batch send. Per-message failures are not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSendResult {
    /// `(entry id, message id)` for each delivered message.
    pub successful: Vec<(String, String)>,
    pub failed: Vec<BatchFailure>,
}

/// An SES receipt rule that stores incoming mail in an S3 bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRuleSpec {
    pub rule_set_name: String,
    pub rule_name: String,
    pub bucket_name: String,
    pub recipients: Vec<String>,
}

/// Temporary credentials issued by STS. The secret parts are never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumedRole {
    pub assumed_role_arn: Option<String>,
    pub access_key_id: String,
    pub expiration: Option<DateTime<Utc>>,
}

/// A DynamoDB item rendered as attribute name to display value.
pub type ScanItem = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct ConverseRequest {
    pub model_id: String,
    pub prompt: String,
    pub max_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
}

impl ConverseRequest {
    /// A request with the inference settings the Bedrock samples use.
    #[must_use]
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            prompt: prompt.into(),
            max_tokens: 512,
            temperature: 0.5,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub model_name: String,
    pub execution_role_arn: String,
    pub image: String,
    pub model_data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJobSpec {
    pub role_arn: String,
    pub file_input: String,
    pub file_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub id: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Render an optional service timestamp for console output; `-` when absent.
#[must_use]
pub fn format_timestamp(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_status_parses_known_values() {
        for status in [
            ExecutionStatus::Running,
            ExecutionStatus::Succeeded,
            ExecutionStatus::Failed,
            ExecutionStatus::TimedOut,
            ExecutionStatus::Aborted,
            ExecutionStatus::PendingRedrive,
        ] {
            assert_eq!(ExecutionStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_execution_status_is_preserved() {
        let status = ExecutionStatus::parse("PAUSED");

        assert_eq!(status, ExecutionStatus::Other("PAUSED".to_string()));
        assert_eq!(status.to_string(), "PAUSED");
        assert!(!status.is_running());
    }

    #[test]
    fn converse_request_uses_sample_inference_settings() {
        let request = ConverseRequest::new("amazon.titan-text-premier-v1:0", "hi");

        assert_eq!(request.max_tokens, 512);
        assert!((request.temperature - 0.5).abs() < f32::EPSILON);
        assert!((request.top_p - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn timestamps_render_without_fraction() {
        let time = DateTime::from_timestamp(1_700_000_000, 500).expect("valid timestamp");

        assert_eq!(format_timestamp(Some(time)), "2023-11-14 22:13:20");
        assert_eq!(format_timestamp(None), "-");
    }
}
