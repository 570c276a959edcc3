use std::marker::PhantomData;

use async_trait::async_trait;
use scenario_core::{ResourceHandle, ResourceKind};
use scenario_runner::{ScenarioStep, StepOutput};
use serde::Deserialize;
use tracing::{debug, info};

use super::context::StepFunctionsContext;
use super::data::StepFunctionsData;
use crate::OperationError;
use crate::traits::{
    IamProvider, InteractionProvider, PromptInput, StepFunctionsProvider, prompt_non_empty,
};
use crate::types::format_timestamp;

/// Placeholder in the state machine definition replaced by the activity ARN.
pub const ACTIVITY_ARN_PLACEHOLDER: &str = "{{DOC_EXAMPLE_ACTIVITY_ARN}}";

/// Chat choice that ends the conversation.
const DONE_ACTION: &str = "done";

/// Trust policy that lets Step Functions assume the state machine role.
pub const STATES_TRUST_POLICY: &str = r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Effect": "Allow",
      "Principal": { "Service": "states.amazonaws.com" },
      "Action": "sts:AssumeRole"
    }
  ]
}"#;

const BUNDLED_DEFINITION: &str = include_str!("chat_sfn.json");

fn required<'a>(value: Option<&'a str>, what: &'static str) -> Result<&'a str, OperationError> {
    value.ok_or_else(|| OperationError::InvalidRequest {
        what,
        message: "not produced by an earlier step".to_string(),
    })
}

pub struct GetOrCreateRoleStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> GetOrCreateRoleStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for GetOrCreateRoleStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for GetOrCreateRoleStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "get_or_create_role"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let role_name = &ctx.settings().role_name;
        match ctx.iam().get_role(role_name).await {
            Ok(role) => {
                debug!(role = %role.role_name, "using existing role");
                ctx.interaction()
                    .show(&format!("Using the existing role {}.", role.role_name));
                input.role = Some(role);
                Ok(StepOutput::new(input))
            }
            Err(err) if err.is_not_found() => {
                ctx.interaction()
                    .show(&format!("Role {role_name} doesn't exist. Creating it..."));
                let role = ctx.iam().create_role(role_name, STATES_TRUST_POLICY).await?;
                let handle = ResourceHandle::new(ResourceKind::Role, role.role_name.clone());
                input.role = Some(role);
                input.role_created = true;
                Ok(StepOutput::new(input).with_resource(handle))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        ctx.iam().delete_role(&resource.identifier).await?;
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete IAM role '{}'", resource.identifier)
    }
}

pub struct CreateActivityStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> CreateActivityStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for CreateActivityStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for CreateActivityStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "create_activity"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        ctx.interaction().title("Create activity");
        let arn = ctx
            .step_functions()
            .create_activity(&ctx.settings().activity_name)
            .await?;
        ctx.interaction()
            .show(&format!("Activity created. Its ARN is: {arn}"));
        let handle = ResourceHandle::new(ResourceKind::Activity, arn.clone());
        input.activity_arn = Some(arn);
        Ok(StepOutput::new(input).with_resource(handle))
    }

    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        ctx.step_functions()
            .delete_activity(&resource.identifier)
            .await?;
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete activity '{}'", resource.identifier)
    }
}

pub struct CreateStateMachineStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> CreateStateMachineStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for CreateStateMachineStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for CreateStateMachineStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "create_state_machine"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        ctx.interaction().title("Create state machine");
        let activity_arn = required(input.activity_arn.as_deref(), "activity ARN")?;
        let role_arn = required(input.role.as_ref().map(|r| r.arn.as_str()), "role ARN")?;

        let template = match &ctx.settings().definition {
            Some(path) => std::fs::read_to_string(path).map_err(|source| {
                OperationError::DefinitionRead {
                    path: path.clone(),
                    source,
                }
            })?,
            None => BUNDLED_DEFINITION.to_string(),
        };
        let definition = template.replace(ACTIVITY_ARN_PLACEHOLDER, activity_arn);
        serde_json::from_str::<serde_json::Value>(&definition)
            .map_err(OperationError::DefinitionParse)?;

        let arn = ctx
            .step_functions()
            .create_state_machine(&ctx.settings().state_machine_name, &definition, role_arn)
            .await?;
        ctx.interaction().show(&format!(
            "The state machine has been created. Its ARN is: {arn}"
        ));
        let handle = ResourceHandle::new(ResourceKind::StateMachine, arn.clone());
        input.state_machine_arn = Some(arn);
        Ok(StepOutput::new(input).with_resource(handle))
    }

    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        ctx.step_functions()
            .delete_state_machine(&resource.identifier)
            .await?;
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete state machine '{}'", resource.identifier)
    }
}

pub struct AskUserNameStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> AskUserNameStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for AskUserNameStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for AskUserNameStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "ask_user_name"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let answer = prompt_non_empty(
            ctx.interaction(),
            "Before we start the state machine, what should ChatSFN call you?",
            "Enter your name:",
        )?;
        let PromptInput::Provided(name) = answer else {
            return Err(OperationError::Cancelled);
        };

        ctx.interaction()
            .show(&format!("Thank you, {name}. Now let's get started..."));
        ctx.interaction().pause()?;
        input.user_name = Some(name);
        Ok(StepOutput::new(input))
    }
}

pub struct StartExecutionStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> StartExecutionStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for StartExecutionStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for StartExecutionStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "start_execution"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        ctx.interaction().title("ChatSFN");
        let state_machine_arn =
            required(input.state_machine_arn.as_deref(), "state machine ARN")?;
        let user_name = required(input.user_name.as_deref(), "user name")?;
        let payload = serde_json::json!({ "name": user_name }).to_string();

        let execution = ctx
            .step_functions()
            .start_execution(
                state_machine_arn,
                ctx.settings().execution_name.as_deref(),
                &payload,
            )
            .await?;
        info!(arn = %execution.execution_arn, "execution started");
        ctx.interaction().show("State machine execution started.");

        let mut handle = ResourceHandle::new(ResourceKind::Execution, &execution.execution_arn);
        if let Some(started) = execution.start_date {
            handle = handle.with_created_at(started);
        }
        input.execution = Some(execution);
        Ok(StepOutput::new(input).with_resource(handle))
    }

    /// Executions cannot be deleted; a still-running one is stopped.
    async fn compensate(
        &self,
        ctx: &Self::Context,
        resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        let description = ctx
            .step_functions()
            .describe_execution(&resource.identifier)
            .await?;
        if description.status.is_running() {
            ctx.step_functions()
                .stop_execution(&resource.identifier)
                .await?;
        } else {
            debug!(
                arn = %resource.identifier,
                status = %description.status,
                "execution already finished"
            );
        }
        Ok(())
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("stop execution '{}' if still running", resource.identifier)
    }
}

pub struct ChatStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> ChatStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for ChatStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for ChatStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "chat"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let activity_arn = required(input.activity_arn.as_deref(), "activity ARN")?.to_string();
        let user_name = required(input.user_name.as_deref(), "user name")?;
        let settings = ctx.settings();
        let question = format!("{user_name}, please tell me your choice:");

        let mut idle_polls = 0;
        loop {
            let Some(task) = ctx
                .step_functions()
                .get_activity_task(&activity_arn, &settings.worker_name)
                .await?
            else {
                idle_polls += 1;
                if idle_polls >= settings.max_polls.get() {
                    return Err(OperationError::ExecutionTimedOut {
                        execution_arn: input
                            .execution
                            .as_ref()
                            .map(|e| e.execution_arn.clone())
                            .unwrap_or_default(),
                        polls: idle_polls,
                    });
                }
                continue;
            };
            idle_polls = 0;

            show_task(ctx.interaction(), &task.input);
            let PromptInput::Provided(choice) =
                prompt_non_empty(ctx.interaction(), &question, "Please enter a choice:")?
            else {
                return Err(OperationError::Cancelled);
            };

            ctx.interaction().show(&format!("You have selected {choice}"));
            // The state machine's Choice state matches the exact lowercase word.
            let finished = choice.eq_ignore_ascii_case(DONE_ACTION);
            let action = if finished { DONE_ACTION } else { choice.as_str() };
            let reply = serde_json::json!({ "action": action }).to_string();
            ctx.step_functions()
                .send_task_success(&task.task_token, &reply)
                .await?;
            input.chat_turns += 1;

            if finished {
                break;
            }
        }

        debug!(turns = input.chat_turns, "chat finished");
        Ok(StepOutput::new(input))
    }
}

pub struct AwaitExecutionStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> AwaitExecutionStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for AwaitExecutionStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for AwaitExecutionStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "await_execution"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let execution_arn = required(
            input.execution.as_ref().map(|e| e.execution_arn.as_str()),
            "execution ARN",
        )?
        .to_string();
        let settings = ctx.settings();

        for poll in 1..=settings.max_polls.get() {
            let description = ctx
                .step_functions()
                .describe_execution(&execution_arn)
                .await?;
            if !description.status.is_running() {
                ctx.interaction().show(&format!(
                    "Execution finished with status {}.",
                    description.status
                ));
                if let Some(output) = &description.output {
                    ctx.interaction().show(&format!("Output: {output}"));
                }
                input.final_state = Some(description);
                return Ok(StepOutput::new(input));
            }
            debug!(poll, status = %description.status, "execution still running");
            tokio::time::sleep(settings.poll_interval()).await;
        }

        Err(OperationError::ExecutionTimedOut {
            execution_arn,
            polls: settings.max_polls.get(),
        })
    }
}

pub struct ListExecutionsStep<S, I, U> {
    _marker: PhantomData<(S, I, U)>,
}

impl<S, I, U> ListExecutionsStep<S, I, U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, I, U> Default for ListExecutionsStep<S, I, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, I, U> ScenarioStep for ListExecutionsStep<S, I, U>
where
    S: StepFunctionsProvider + 'static,
    I: IamProvider + 'static,
    U: InteractionProvider + 'static,
{
    type Input = StepFunctionsData;
    type Output = StepFunctionsData;
    type Context = StepFunctionsContext<S, I, U>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "list_executions"
    }

    async fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        let state_machine_arn =
            required(input.state_machine_arn.as_deref(), "state machine ARN")?;
        let executions = ctx
            .step_functions()
            .list_executions(state_machine_arn)
            .await?;

        ctx.interaction().title("Step Functions executions");
        for execution in &executions {
            ctx.interaction().show(&format!(
                "{}\t{}\t{} to {}",
                execution.name,
                execution.status,
                format_timestamp(execution.start_date),
                format_timestamp(execution.stop_date),
            ));
        }
        input.executions = executions;
        Ok(StepOutput::new(input))
    }
}

#[derive(Deserialize)]
struct ChatPrompt {
    message: String,
    #[serde(default)]
    actions: Vec<String>,
}

/// Show an activity task's input. Inputs that are not a chat prompt are shown
/// as they are.
fn show_task<U: InteractionProvider>(interaction: &U, input: &str) {
    match serde_json::from_str::<ChatPrompt>(input) {
        Ok(prompt) => {
            interaction.show(&format!("ChatSFN: {}", prompt.message));
            if !prompt.actions.is_empty() {
                interaction.show(&format!("Choices: {}", prompt.actions.join(", ")));
            }
        }
        Err(_) => interaction.show(&format!("ChatSFN: {input}")),
    }
}
