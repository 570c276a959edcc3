//! Integration tests for the scenario audit log.

use async_trait::async_trait;
use scenario_runner::{
    ResourceHandle, ResourceKind, ScenarioBuilder, ScenarioStep, StepOutput, StepStatus,
};

struct TestContext;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

struct CreateStep {
    name: &'static str,
    fail_compensation: bool,
}

#[async_trait]
impl ScenarioStep for CreateStep {
    type Input = u32;
    type Output = u32;
    type Context = TestContext;
    type Error = TestError;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute(
        &self,
        _ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        Ok(StepOutput::new(input + 1)
            .with_resource(ResourceHandle::new(ResourceKind::Activity, self.name)))
    }

    async fn compensate(
        &self,
        _ctx: &Self::Context,
        _resource: &ResourceHandle,
    ) -> Result<(), Self::Error> {
        if self.fail_compensation {
            Err(TestError("denied".to_string()))
        } else {
            Ok(())
        }
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        format!("delete activity {}", resource.identifier)
    }
}

struct FailingStep;

#[async_trait]
impl ScenarioStep for FailingStep {
    type Input = u32;
    type Output = u32;
    type Context = TestContext;
    type Error = TestError;

    fn name(&self) -> &'static str {
        "start_execution"
    }

    async fn execute(
        &self,
        _ctx: &Self::Context,
        _input: Self::Input,
    ) -> Result<StepOutput<Self::Output>, Self::Error> {
        Err(TestError("execution limit exceeded".to_string()))
    }
}

fn create(name: &'static str) -> CreateStep {
    CreateStep {
        name,
        fail_compensation: false,
    }
}

#[tokio::test]
async fn successful_run_logs_all_steps_as_executed() {
    let scenario = ScenarioBuilder::new()
        .first_step(create("create_activity"))
        .then(create("create_state_machine"))
        .build();

    let result = scenario.run(&TestContext, 0).await;

    let records = result.audit_log().records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.status == StepStatus::Executed));
    assert!(records.iter().all(|r| r.completed_at.is_some()));
    assert!(records.iter().all(|r| r.resources_created == 1));
    assert!(result.audit_log().compensations().is_empty());
}

#[tokio::test]
async fn failed_run_logs_failed_and_compensated_steps() {
    let scenario = ScenarioBuilder::new()
        .first_step(create("create_activity"))
        .then(create("create_state_machine"))
        .then(FailingStep)
        .build();

    let result = scenario.run(&TestContext, 0).await;

    let records = result.audit_log().records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].status, StepStatus::Compensated);
    assert_eq!(records[1].status, StepStatus::Compensated);
    assert_eq!(records[2].name, "start_execution");
    assert_eq!(records[2].status, StepStatus::Failed);

    let descriptions: Vec<&str> = result
        .audit_log()
        .compensations()
        .iter()
        .map(|c| c.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        [
            "delete activity create_state_machine",
            "delete activity create_activity"
        ]
    );
}

#[tokio::test]
async fn compensation_failure_logged_correctly() {
    let scenario = ScenarioBuilder::new()
        .first_step(CreateStep {
            name: "create_role",
            fail_compensation: true,
        })
        .then(FailingStep)
        .build();

    let result = scenario.run(&TestContext, 0).await;

    let records = result.audit_log().records();
    assert_eq!(records[0].status, StepStatus::CompensationFailed);
    let compensations = result.audit_log().compensations();
    assert_eq!(compensations.len(), 1);
    assert!(!compensations[0].succeeded);
    assert_eq!(compensations[0].step, "create_role");
}

#[tokio::test]
async fn audit_log_timing_is_ordered() {
    let scenario = ScenarioBuilder::new()
        .first_step(create("a"))
        .then(create("b"))
        .build();

    let result = scenario.run(&TestContext, 0).await;

    let records = result.audit_log().records();
    for record in records {
        let completed = record.completed_at.expect("completed");
        assert!(completed >= record.started_at);
    }
    assert!(records[1].started_at >= records[0].started_at);
}

#[tokio::test]
async fn summary_shows_status_indicators() {
    let scenario = ScenarioBuilder::new()
        .first_step(create("create_activity"))
        .then(FailingStep)
        .build();

    let result = scenario.run(&TestContext, 0).await;

    let summary = result.audit_log().summary();
    assert!(summary.contains("↩ create_activity"));
    assert!(summary.contains("✗ start_execution"));
    assert!(summary.contains("delete activity create_activity"));
}

#[tokio::test]
async fn teardown_is_recorded_in_audit_log() {
    let scenario = ScenarioBuilder::new()
        .first_step(create("create_activity"))
        .build();

    let mut result = scenario.run(&TestContext, 0).await;
    scenario.teardown(&TestContext, &mut result).await;

    let records = result.audit_log().records();
    assert_eq!(records[0].status, StepStatus::Compensated);
    assert_eq!(result.audit_log().compensations().len(), 1);
}
