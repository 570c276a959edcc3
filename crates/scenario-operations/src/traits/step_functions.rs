use async_trait::async_trait;
use scenario_core::Result;

use crate::types::{ActivityTask, ExecutionDescription, ExecutionSummary, StartedExecution};

#[async_trait]
pub trait StepFunctionsProvider: Send + Sync {
    /// Create an activity and return its ARN.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request.
    async fn create_activity(&self, name: &str) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the activity cannot be deleted.
    async fn delete_activity(&self, activity_arn: &str) -> Result<()>;

    /// Create a state machine and return its ARN.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is rejected or the role cannot be
    /// assumed by Step Functions.
    async fn create_state_machine(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the state machine cannot be deleted.
    async fn delete_state_machine(&self, state_machine_arn: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the execution cannot be started.
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: Option<&str>,
        input: &str,
    ) -> Result<StartedExecution>;

    /// # Errors
    ///
    /// Returns an error if the execution cannot be stopped.
    async fn stop_execution(&self, execution_arn: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the execution does not exist.
    async fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription>;

    /// # Errors
    ///
    /// Returns an error if the state machine does not exist.
    async fn list_executions(&self, state_machine_arn: &str) -> Result<Vec<ExecutionSummary>>;

    /// Long-poll for a task on `activity_arn`. `Ok(None)` means the poll
    /// ended without work.
    ///
    /// # Errors
    ///
    /// Returns an error if the activity does not exist.
    async fn get_activity_task(
        &self,
        activity_arn: &str,
        worker_name: &str,
    ) -> Result<Option<ActivityTask>>;

    /// # Errors
    ///
    /// Returns an error if the task token is invalid or has expired.
    async fn send_task_success(&self, task_token: &str, output: &str) -> Result<()>;
}
