//! End-to-end tests of the ChatSFN scenario against in-memory services.

use std::num::NonZeroU32;
use std::sync::Arc;

use scenario_core::ResourceKind;
use scenario_operations::OperationError;
use scenario_operations::mocks::{MockIam, MockStepFunctions, ScriptedInteraction, make_task};
use scenario_operations::operations::{
    ACTIVITY_ARN_PLACEHOLDER, StepFunctionsOperation, StepFunctionsOutcome, StepFunctionsSettings,
};
use scenario_operations::types::ExecutionStatus;
use tokio_util::sync::CancellationToken;

const ROLE: &str = "chat-sfn-role";

fn settings() -> StepFunctionsSettings {
    StepFunctionsSettings {
        poll_interval_secs: 0,
        max_polls: NonZeroU32::new(3).expect("non-zero"),
        ..StepFunctionsSettings::default()
    }
}

fn chat_tasks() -> MockStepFunctions {
    MockStepFunctions::new().with_tasks([
        make_task("token-1", "Hello, Ann! What would you like to do?"),
        make_task("token-2", "You asked for question. Anything else, Ann?"),
    ])
}

struct Harness {
    sfn: Arc<MockStepFunctions>,
    iam: Arc<MockIam>,
    interaction: Arc<ScriptedInteraction>,
}

impl Harness {
    fn new(sfn: MockStepFunctions, iam: MockIam, interaction: ScriptedInteraction) -> Self {
        Self {
            sfn: Arc::new(sfn),
            iam: Arc::new(iam),
            interaction: Arc::new(interaction),
        }
    }

    async fn run(&self, settings: StepFunctionsSettings) -> StepFunctionsOutcome {
        self.run_with(settings, CancellationToken::new()).await
    }

    async fn run_with(
        &self,
        settings: StepFunctionsSettings,
        token: CancellationToken,
    ) -> StepFunctionsOutcome {
        StepFunctionsOperation::from_shared(
            Arc::clone(&self.sfn),
            Arc::clone(&self.iam),
            Arc::clone(&self.interaction),
        )
        .execute(settings, token)
        .await
    }
}

#[tokio::test]
async fn full_run_chats_and_tears_everything_down() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann", "question", "done"]),
    );

    let outcome = harness.run(settings()).await;

    assert!(outcome.failure.is_none(), "unexpected failure: {outcome:?}");
    assert_eq!(
        outcome.completed_steps,
        [
            "get_or_create_role",
            "create_activity",
            "create_state_machine",
            "ask_user_name",
            "start_execution",
            "chat",
            "await_execution",
            "list_executions",
        ]
    );
    assert_eq!(
        harness.sfn.calls(),
        [
            "CreateActivity",
            "CreateStateMachine",
            "StartExecution",
            "GetActivityTask",
            "SendTaskSuccess",
            "GetActivityTask",
            "SendTaskSuccess",
            "DescribeExecution",
            "ListExecutions",
            "DescribeExecution",
            "DeleteStateMachine",
            "DeleteActivity",
        ]
    );
    assert_eq!(harness.iam.calls(), ["GetRole", "CreateRole", "DeleteRole"]);
    assert!(!harness.iam.has_role(ROLE));
    assert!(harness.sfn.activities().is_empty());
    assert_eq!(harness.sfn.state_machine_count(), 0);
    assert!(outcome.kept_resources.is_empty());
    assert!(outcome.into_result().is_ok());
}

#[tokio::test]
async fn chat_replies_carry_the_chosen_action() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann", "question", "done"]),
    );

    let outcome = harness.run(settings()).await;

    let data = outcome.data.expect("scenario data");
    assert_eq!(data.chat_turns, 2);
    assert_eq!(data.user_name.as_deref(), Some("Ann"));
    assert_eq!(
        harness.sfn.task_results(),
        [
            ("token-1".to_string(), r#"{"action":"question"}"#.to_string()),
            ("token-2".to_string(), r#"{"action":"done"}"#.to_string()),
        ]
    );
    let execution = data.execution.expect("execution started");
    assert_eq!(
        harness.sfn.execution_input(&execution.execution_arn).as_deref(),
        Some(r#"{"name":"Ann"}"#)
    );
    assert!(
        harness
            .interaction
            .shown()
            .iter()
            .any(|line| line == "ChatSFN: Hello, Ann! What would you like to do?")
    );
}

#[tokio::test]
async fn done_in_any_case_is_sent_as_the_lowercase_action() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann", "Question", "DONE"]),
    );

    let outcome = harness.run(settings()).await;

    assert!(outcome.failure.is_none(), "unexpected failure: {outcome:?}");
    assert_eq!(
        harness.sfn.task_results(),
        [
            ("token-1".to_string(), r#"{"action":"Question"}"#.to_string()),
            ("token-2".to_string(), r#"{"action":"done"}"#.to_string()),
        ]
    );
}

#[tokio::test]
async fn bundled_definition_ends_on_the_lowercase_done_action() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann", "done"]),
    );
    let settings = StepFunctionsSettings {
        keep_resources: true,
        ..settings()
    };

    let outcome = harness.run(settings).await;

    let data = outcome.data.expect("scenario data");
    let arn = data.state_machine_arn.expect("state machine created");
    let definition: serde_json::Value =
        serde_json::from_str(&harness.sfn.definition(&arn).expect("definition stored"))
            .expect("definition is JSON");
    assert_eq!(
        definition["States"]["Decide"]["Choices"][0]["StringEquals"],
        "done"
    );
}

#[tokio::test]
async fn state_machine_definition_references_the_activity() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann", "done"]),
    );

    let outcome = harness
        .run(StepFunctionsSettings {
            keep_resources: true,
            ..settings()
        })
        .await;

    let data = outcome.data.expect("scenario data");
    let state_machine = data.state_machine_arn.expect("state machine created");
    let definition = harness
        .sfn
        .definition(&state_machine)
        .expect("definition stored");
    let activity = data.activity_arn.expect("activity created");
    assert!(definition.contains(&activity));
    assert!(!definition.contains(ACTIVITY_ARN_PLACEHOLDER));
}

#[tokio::test]
async fn failed_start_compensates_state_machine_then_activity() {
    let harness = Harness::new(
        chat_tasks().failing_on("StartExecution"),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann"]),
    );

    let outcome = harness.run(settings()).await;

    assert_eq!(
        outcome.completed_steps,
        [
            "get_or_create_role",
            "create_activity",
            "create_state_machine",
            "ask_user_name",
        ]
    );
    assert_eq!(
        harness.sfn.calls(),
        [
            "CreateActivity",
            "CreateStateMachine",
            "StartExecution",
            "DeleteStateMachine",
            "DeleteActivity",
        ]
    );
    // The role existed before the run, so it is left alone.
    assert_eq!(harness.iam.calls(), ["GetRole"]);
    assert!(harness.iam.has_role(ROLE));

    let failure = outcome.failure.expect("scenario failed");
    assert!(matches!(
        &failure,
        OperationError::ScenarioFailed { step, .. } if step == "start_execution"
    ));
    assert_eq!(
        failure.service_error().map(|e| e.operation.as_str()),
        Some("StartExecution")
    );
}

#[tokio::test]
async fn created_role_is_deleted_after_other_resources() {
    let harness = Harness::new(
        chat_tasks().failing_on("CreateStateMachine"),
        MockIam::new(),
        ScriptedInteraction::new(["Ann"]),
    );

    let outcome = harness.run(settings()).await;

    assert!(outcome.failure.is_some());
    assert_eq!(
        harness.sfn.calls(),
        ["CreateActivity", "CreateStateMachine", "DeleteActivity"]
    );
    assert_eq!(harness.iam.calls(), ["GetRole", "CreateRole", "DeleteRole"]);
    assert!(outcome.audit_summary.contains("delete IAM role 'chat-sfn-role'"));
}

#[tokio::test]
async fn cancelled_name_prompt_cleans_up_and_counts_as_success() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann"]).cancel_after(0),
    );

    let outcome = harness.run(settings()).await;

    assert!(outcome.was_cancelled());
    assert_eq!(
        harness.sfn.calls(),
        [
            "CreateActivity",
            "CreateStateMachine",
            "DeleteStateMachine",
            "DeleteActivity",
        ]
    );
    assert!(!harness.iam.has_role(ROLE));
    assert!(outcome.into_result().is_ok());
}

#[tokio::test]
async fn interrupted_run_makes_no_calls() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann"]),
    );
    let token = CancellationToken::new();
    token.cancel();

    let outcome = harness.run_with(settings(), token).await;

    assert!(outcome.was_cancelled());
    assert!(matches!(
        outcome.failure,
        Some(OperationError::ScenarioCancelled { ref next_step })
            if next_step == "get_or_create_role"
    ));
    assert!(harness.sfn.calls().is_empty());
    assert!(harness.iam.calls().is_empty());
}

#[tokio::test]
async fn keep_resources_skips_teardown() {
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann", "done"]),
    );

    let outcome = harness
        .run(StepFunctionsSettings {
            keep_resources: true,
            ..settings()
        })
        .await;

    assert!(outcome.failure.is_none());
    let kinds: Vec<_> = outcome.kept_resources.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            ResourceKind::Execution,
            ResourceKind::StateMachine,
            ResourceKind::Activity,
            ResourceKind::Role,
        ]
    );
    assert!(!harness.sfn.calls().iter().any(|c| c.starts_with("Delete")));
    assert!(harness.iam.has_role(ROLE));
}

#[tokio::test]
async fn execution_that_never_finishes_is_stopped() {
    let harness = Harness::new(
        chat_tasks().with_statuses([ExecutionStatus::Running]),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann", "done"]),
    );

    let outcome = harness.run(settings()).await;

    assert!(matches!(
        outcome.failure,
        Some(OperationError::ScenarioFailed { ref step, ref source })
            if step == "await_execution"
                && matches!(**source, OperationError::ExecutionTimedOut { polls: 3, .. })
    ));
    let calls = harness.sfn.calls();
    let stop = calls
        .iter()
        .position(|c| c == "StopExecution")
        .expect("execution stopped");
    let delete = calls
        .iter()
        .position(|c| c == "DeleteStateMachine")
        .expect("state machine deleted");
    assert!(stop < delete);
}

#[tokio::test]
async fn idle_activity_polls_time_out() {
    let harness = Harness::new(
        MockStepFunctions::new(),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann"]),
    );

    let outcome = harness.run(settings()).await;

    let failure = outcome.failure.expect("chat timed out");
    assert!(matches!(
        failure,
        OperationError::ScenarioFailed { ref step, .. } if step == "chat"
    ));
    let polls = harness
        .sfn
        .calls()
        .iter()
        .filter(|c| *c == "GetActivityTask")
        .count();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn failed_compensation_does_not_stop_cleanup() {
    let harness = Harness::new(
        chat_tasks().failing_on("DeleteStateMachine"),
        MockIam::new(),
        ScriptedInteraction::new(["Ann", "done"]),
    );

    let outcome = harness.run(settings()).await;

    assert!(outcome.failure.is_none());
    assert_eq!(outcome.cleanup_failures.len(), 1);
    assert_eq!(outcome.cleanup_failures[0].step, "create_state_machine");
    assert!(harness.sfn.calls().contains(&"DeleteActivity".to_string()));
    assert_eq!(harness.iam.calls().last().map(String::as_str), Some("DeleteRole"));
    assert!(matches!(
        outcome.into_result(),
        Err(OperationError::CleanupIncomplete { ref failures }) if failures.len() == 1
    ));
}

#[tokio::test]
async fn custom_definition_file_is_used() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("machine.json");
    std::fs::write(
        &path,
        format!(
            r#"{{"StartAt":"Ask","States":{{"Ask":{{"Type":"Task","Resource":"{ACTIVITY_ARN_PLACEHOLDER}","End":true}}}}}}"#
        ),
    )
    .expect("write definition");
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new(),
        ScriptedInteraction::new(["Ann", "done"]),
    );

    let outcome = harness
        .run(StepFunctionsSettings {
            definition: Some(path),
            keep_resources: true,
            ..settings()
        })
        .await;

    let data = outcome.data.expect("scenario data");
    let definition = harness
        .sfn
        .definition(data.state_machine_arn.as_deref().expect("state machine"))
        .expect("definition stored");
    assert!(definition.starts_with(r#"{"StartAt":"Ask""#));
    assert!(definition.contains(data.activity_arn.as_deref().expect("activity")));
}

#[tokio::test]
async fn invalid_definition_file_fails_before_creating_the_state_machine() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write definition");
    let harness = Harness::new(
        chat_tasks(),
        MockIam::new().with_role(ROLE),
        ScriptedInteraction::new(["Ann"]),
    );

    let outcome = harness
        .run(StepFunctionsSettings {
            definition: Some(path),
            ..settings()
        })
        .await;

    assert!(matches!(
        outcome.failure,
        Some(OperationError::ScenarioFailed { ref source, .. })
            if matches!(**source, OperationError::DefinitionParse(_))
    ));
    assert_eq!(harness.sfn.calls(), ["CreateActivity", "DeleteActivity"]);
}
