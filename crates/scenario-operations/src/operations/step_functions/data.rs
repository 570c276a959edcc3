use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{ExecutionDescription, ExecutionSummary, RoleInfo, StartedExecution};

const DEFAULT_MAX_POLLS: NonZeroU32 = NonZeroU32::new(30).expect("30 is non-zero");

/// Settings from the `[step_functions]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepFunctionsSettings {
    pub activity_name: String,
    pub state_machine_name: String,
    pub role_name: String,
    /// State machine definition to use instead of the bundled one.
    pub definition: Option<PathBuf>,
    /// Execution name; the service generates one when unset.
    pub execution_name: Option<String>,
    pub worker_name: String,
    pub poll_interval_secs: u64,
    /// Status checks, and idle activity polls, before giving up. Zero is
    /// rejected when the settings are parsed.
    pub max_polls: NonZeroU32,
    pub keep_resources: bool,
}

impl Default for StepFunctionsSettings {
    fn default() -> Self {
        Self {
            activity_name: "chat-sfn-activity".to_string(),
            state_machine_name: "chat-sfn-state-machine".to_string(),
            role_name: "chat-sfn-role".to_string(),
            definition: None,
            execution_name: None,
            worker_name: "chat-sfn-worker".to_string(),
            poll_interval_secs: 2,
            max_polls: DEFAULT_MAX_POLLS,
            keep_resources: false,
        }
    }
}

impl StepFunctionsSettings {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// State threaded through every step of the Step Functions scenario.
#[derive(Debug, Clone, Default)]
pub struct StepFunctionsData {
    pub role: Option<RoleInfo>,
    pub role_created: bool,
    pub activity_arn: Option<String>,
    pub state_machine_arn: Option<String>,
    pub user_name: Option<String>,
    pub execution: Option<StartedExecution>,
    pub chat_turns: u32,
    pub final_state: Option<ExecutionDescription>,
    pub executions: Vec<ExecutionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: StepFunctionsSettings = toml::from_str(
            r#"
            activity_name = "my-activity"
            max_polls = 5
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.activity_name, "my-activity");
        assert_eq!(settings.max_polls.get(), 5);
        assert_eq!(settings.role_name, "chat-sfn-role");
        assert_eq!(settings.poll_interval(), Duration::from_secs(2));
    }

    #[test]
    fn unknown_settings_are_rejected() {
        let result = toml::from_str::<StepFunctionsSettings>("activty_name = \"typo\"");

        assert!(result.is_err());
    }

    #[test]
    fn zero_max_polls_is_rejected() {
        let err = toml::from_str::<StepFunctionsSettings>("max_polls = 0").expect_err("zero polls");

        assert!(err.to_string().contains("max_polls"), "{err}");
    }
}
