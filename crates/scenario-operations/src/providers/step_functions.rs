use async_trait::async_trait;
use aws_sdk_sfn::Client;
use scenario_core::Result;
use tracing::debug;

use super::context::AwsContext;
use super::convert::{service_error, timestamp};
use crate::traits::StepFunctionsProvider;
use crate::types::{
    ActivityTask, ExecutionDescription, ExecutionStatus, ExecutionSummary, StartedExecution,
};

pub struct AwsStepFunctionsProvider {
    client: Client,
}

impl AwsStepFunctionsProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.sfn_client())
    }
}

#[async_trait]
impl StepFunctionsProvider for AwsStepFunctionsProvider {
    async fn create_activity(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .create_activity()
            .name(name)
            .send()
            .await
            .map_err(|e| service_error("CreateActivity", e))?;
        debug!(activity = name, arn = output.activity_arn(), "activity created");
        Ok(output.activity_arn().to_string())
    }

    async fn delete_activity(&self, activity_arn: &str) -> Result<()> {
        self.client
            .delete_activity()
            .activity_arn(activity_arn)
            .send()
            .await
            .map_err(|e| service_error("DeleteActivity", e))?;
        debug!(arn = activity_arn, "activity deleted");
        Ok(())
    }

    async fn create_state_machine(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<String> {
        let output = self
            .client
            .create_state_machine()
            .name(name)
            .definition(definition)
            .role_arn(role_arn)
            .send()
            .await
            .map_err(|e| service_error("CreateStateMachine", e))?;
        debug!(
            state_machine = name,
            arn = output.state_machine_arn(),
            "state machine created"
        );
        Ok(output.state_machine_arn().to_string())
    }

    async fn delete_state_machine(&self, state_machine_arn: &str) -> Result<()> {
        self.client
            .delete_state_machine()
            .state_machine_arn(state_machine_arn)
            .send()
            .await
            .map_err(|e| service_error("DeleteStateMachine", e))?;
        debug!(arn = state_machine_arn, "state machine deleted");
        Ok(())
    }

    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: Option<&str>,
        input: &str,
    ) -> Result<StartedExecution> {
        let output = self
            .client
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .set_name(name.map(ToString::to_string))
            .input(input)
            .send()
            .await
            .map_err(|e| service_error("StartExecution", e))?;
        debug!(arn = output.execution_arn(), "execution started");
        Ok(StartedExecution {
            execution_arn: output.execution_arn().to_string(),
            start_date: timestamp(output.start_date()),
        })
    }

    async fn stop_execution(&self, execution_arn: &str) -> Result<()> {
        self.client
            .stop_execution()
            .execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| service_error("StopExecution", e))?;
        debug!(arn = execution_arn, "execution stopped");
        Ok(())
    }

    async fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription> {
        let output = self
            .client
            .describe_execution()
            .execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| service_error("DescribeExecution", e))?;
        Ok(ExecutionDescription {
            execution_arn: output.execution_arn().to_string(),
            status: ExecutionStatus::parse(output.status().as_str()),
            output: output.output().map(ToString::to_string),
            start_date: timestamp(output.start_date()),
            stop_date: output.stop_date().and_then(timestamp),
        })
    }

    async fn list_executions(&self, state_machine_arn: &str) -> Result<Vec<ExecutionSummary>> {
        let mut pages = self
            .client
            .list_executions()
            .state_machine_arn(state_machine_arn)
            .into_paginator()
            .send();

        let mut executions = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| service_error("ListExecutions", e))?;
            executions.extend(page.executions().iter().map(|item| ExecutionSummary {
                name: item.name().to_string(),
                execution_arn: item.execution_arn().to_string(),
                status: ExecutionStatus::parse(item.status().as_str()),
                start_date: timestamp(item.start_date()),
                stop_date: item.stop_date().and_then(timestamp),
            }));
        }
        debug!(
            arn = state_machine_arn,
            count = executions.len(),
            "listed executions"
        );
        Ok(executions)
    }

    async fn get_activity_task(
        &self,
        activity_arn: &str,
        worker_name: &str,
    ) -> Result<Option<ActivityTask>> {
        let output = self
            .client
            .get_activity_task()
            .activity_arn(activity_arn)
            .worker_name(worker_name)
            .send()
            .await
            .map_err(|e| service_error("GetActivityTask", e))?;

        // An empty token means the long poll timed out.
        Ok(output
            .task_token()
            .filter(|token| !token.is_empty())
            .map(|token| ActivityTask {
                task_token: token.to_string(),
                input: output.input().unwrap_or("{}").to_string(),
            }))
    }

    async fn send_task_success(&self, task_token: &str, output: &str) -> Result<()> {
        self.client
            .send_task_success()
            .task_token(task_token)
            .output(output)
            .send()
            .await
            .map_err(|e| service_error("SendTaskSuccess", e))?;
        Ok(())
    }
}
