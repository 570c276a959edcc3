use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use scenario_core::{Result as ServiceResult, ServiceError};

use crate::Result;
use crate::traits::{
    BedrockProvider, DynamoDbProvider, IamProvider, InteractionProvider, KmsProvider,
    MediaConvertProvider, PromptInput, S3Provider, SageMakerProvider, SesProvider, SqsProvider,
    StepFunctionsProvider, StsProvider,
};
use crate::types::{
    ActivityTask, AssumedRole, BatchFailure, BatchMessage, BatchSendResult, BucketInfo,
    ConverseRequest, ExecutionDescription, ExecutionStatus, ExecutionSummary, JobInfo, ModelSpec,
    ReceiptRuleSpec, RoleInfo, ScanItem, StartedExecution, TranscodeJobSpec,
};

const MOCK_ACCOUNT: &str = "123456789012";
const MOCK_REGION: &str = "us-east-1";

/// Ordered record of the operations a mock received, with optional failure
/// injection per operation name.
#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<String>>,
    failing: HashSet<&'static str>,
}

impl CallLog {
    fn record(&self, operation: &'static str) -> ServiceResult<()> {
        self.calls
            .lock()
            .expect("call log lock poisoned")
            .push(operation.to_string());
        if self.failing.contains(operation) {
            return Err(ServiceError::from_parts(
                operation,
                Some("MockFailure"),
                Some("injected failure"),
            ));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log lock poisoned").clone()
    }
}

/// Answers questions from a script instead of a terminal.
pub struct ScriptedInteraction {
    answers: Mutex<VecDeque<String>>,
    confirmations: Mutex<VecDeque<bool>>,
    cancel_after: Option<usize>,
    questions: Mutex<Vec<String>>,
    shown: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    #[must_use]
    pub fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(ToString::to_string).collect()),
            confirmations: Mutex::new(VecDeque::new()),
            cancel_after: None,
            questions: Mutex::new(Vec::new()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Report cancellation once `answered` prompts have been answered.
    #[must_use]
    pub fn cancel_after(mut self, answered: usize) -> Self {
        self.cancel_after = Some(answered);
        self
    }

    /// Answers for `confirm`; once exhausted every confirmation is `true`.
    #[must_use]
    pub fn with_confirmations(self, confirmations: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations
            .lock()
            .expect("confirmations lock poisoned")
            .extend(confirmations);
        self
    }

    /// Every question asked through `prompt` or `confirm`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("questions lock poisoned").clone()
    }

    /// Text passed to `show` and `title`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().expect("shown lock poisoned").clone()
    }
}

impl InteractionProvider for ScriptedInteraction {
    fn show(&self, text: &str) {
        self.shown
            .lock()
            .expect("shown lock poisoned")
            .push(text.to_string());
    }

    fn title(&self, text: &str) {
        self.show(text);
    }

    fn prompt(&self, question: &str) -> Result<PromptInput> {
        let mut questions = self.questions.lock().expect("questions lock poisoned");
        let answered = questions.len();
        questions.push(question.to_string());

        if self.cancel_after.is_some_and(|limit| answered >= limit) {
            return Ok(PromptInput::Cancelled);
        }
        Ok(self
            .answers
            .lock()
            .expect("answers lock poisoned")
            .pop_front()
            .map_or(PromptInput::Cancelled, PromptInput::Provided))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        self.questions
            .lock()
            .expect("questions lock poisoned")
            .push(question.to_string());
        Ok(self
            .confirmations
            .lock()
            .expect("confirmations lock poisoned")
            .pop_front()
            .unwrap_or(true))
    }

    fn pause(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct MockExecution {
    name: String,
    state_machine_arn: String,
    input: String,
    status: ExecutionStatus,
}

#[derive(Default)]
struct StepFunctionsState {
    activities: Vec<String>,
    state_machines: HashMap<String, String>,
    executions: Vec<(String, MockExecution)>,
    statuses: VecDeque<ExecutionStatus>,
    tasks: VecDeque<ActivityTask>,
    task_results: Vec<(String, String)>,
}

/// In-memory Step Functions with scripted execution statuses and activity
/// tasks.
#[derive(Default)]
pub struct MockStepFunctions {
    log: CallLog,
    state: Mutex<StepFunctionsState>,
    execution_output: Option<String>,
}

impl MockStepFunctions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` (e.g. `"StartExecution"`) fail with a service error.
    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    /// Statuses reported by successive `DescribeExecution` calls. The last
    /// one repeats; with none left executions report `SUCCEEDED`.
    #[must_use]
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = ExecutionStatus>) -> Self {
        self.lock().statuses.extend(statuses);
        self
    }

    /// Tasks handed out by successive `GetActivityTask` calls. Once they run
    /// out the poll returns no work.
    #[must_use]
    pub fn with_tasks(self, tasks: impl IntoIterator<Item = ActivityTask>) -> Self {
        self.lock().tasks.extend(tasks);
        self
    }

    #[must_use]
    pub fn with_execution_output(mut self, output: &str) -> Self {
        self.execution_output = Some(output.to_string());
        self
    }

    /// Names of the operations called, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// `(task token, output)` pairs sent with `SendTaskSuccess`.
    #[must_use]
    pub fn task_results(&self) -> Vec<(String, String)> {
        self.lock().task_results.clone()
    }

    /// ARNs of activities that exist (created and not deleted).
    #[must_use]
    pub fn activities(&self) -> Vec<String> {
        self.lock().activities.clone()
    }

    #[must_use]
    pub fn state_machine_count(&self) -> usize {
        self.lock().state_machines.len()
    }

    /// The definition a state machine was created with.
    #[must_use]
    pub fn definition(&self, state_machine_arn: &str) -> Option<String> {
        self.lock().state_machines.get(state_machine_arn).cloned()
    }

    /// The input an execution was started with.
    #[must_use]
    pub fn execution_input(&self, execution_arn: &str) -> Option<String> {
        self.lock()
            .executions
            .iter()
            .find(|(arn, _)| arn == execution_arn)
            .map(|(_, execution)| execution.input.clone())
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    fn lock(&self) -> std::sync::MutexGuard<'_, StepFunctionsState> {
        self.state.lock().expect("step functions state lock poisoned")
    }

    fn arn(resource: &str, name: &str) -> String {
        format!("arn:aws:states:{MOCK_REGION}:{MOCK_ACCOUNT}:{resource}:{name}")
    }

    fn not_found(operation: &str, code: &str, arn: &str) -> ServiceError {
        ServiceError::from_parts(operation, Some(code), Some(&format!("{arn} does not exist")))
    }
}

#[async_trait]
impl StepFunctionsProvider for MockStepFunctions {
    async fn create_activity(&self, name: &str) -> ServiceResult<String> {
        self.log.record("CreateActivity")?;
        let arn = Self::arn("activity", name);
        let mut state = self.lock();
        if !state.activities.contains(&arn) {
            state.activities.push(arn.clone());
        }
        Ok(arn)
    }

    async fn delete_activity(&self, activity_arn: &str) -> ServiceResult<()> {
        self.log.record("DeleteActivity")?;
        self.lock().activities.retain(|arn| arn != activity_arn);
        Ok(())
    }

    async fn create_state_machine(
        &self,
        name: &str,
        definition: &str,
        _role_arn: &str,
    ) -> ServiceResult<String> {
        self.log.record("CreateStateMachine")?;
        let arn = Self::arn("stateMachine", name);
        let mut state = self.lock();
        if state.state_machines.contains_key(&arn) {
            return Err(ServiceError::from_parts(
                "CreateStateMachine",
                Some("StateMachineAlreadyExists"),
                Some(&format!("{arn} already exists")),
            ));
        }
        state.state_machines.insert(arn.clone(), definition.to_string());
        Ok(arn)
    }

    async fn delete_state_machine(&self, state_machine_arn: &str) -> ServiceResult<()> {
        self.log.record("DeleteStateMachine")?;
        self.lock().state_machines.remove(state_machine_arn);
        Ok(())
    }

    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: Option<&str>,
        input: &str,
    ) -> ServiceResult<StartedExecution> {
        self.log.record("StartExecution")?;
        let mut state = self.lock();
        if !state.state_machines.contains_key(state_machine_arn) {
            return Err(Self::not_found(
                "StartExecution",
                "StateMachineDoesNotExist",
                state_machine_arn,
            ));
        }
        let name = name.map_or_else(
            || format!("execution-{}", state.executions.len() + 1),
            ToString::to_string,
        );
        let machine = state_machine_arn.rsplit(':').next().unwrap_or_default();
        let arn = Self::arn("execution", &format!("{machine}:{name}"));
        state.executions.push((
            arn.clone(),
            MockExecution {
                name,
                state_machine_arn: state_machine_arn.to_string(),
                input: input.to_string(),
                status: ExecutionStatus::Running,
            },
        ));
        Ok(StartedExecution {
            execution_arn: arn,
            start_date: Some(Utc::now()),
        })
    }

    async fn stop_execution(&self, execution_arn: &str) -> ServiceResult<()> {
        self.log.record("StopExecution")?;
        let mut state = self.lock();
        let execution = state
            .executions
            .iter_mut()
            .find(|(arn, _)| arn == execution_arn)
            .ok_or_else(|| {
                Self::not_found("StopExecution", "ExecutionDoesNotExist", execution_arn)
            })?;
        execution.1.status = ExecutionStatus::Aborted;
        Ok(())
    }

    async fn describe_execution(&self, execution_arn: &str) -> ServiceResult<ExecutionDescription> {
        self.log.record("DescribeExecution")?;
        let mut state = self.lock();
        let next = if state.statuses.len() > 1 {
            state.statuses.pop_front()
        } else {
            state.statuses.front().cloned()
        };
        let execution = state
            .executions
            .iter_mut()
            .find(|(arn, _)| arn == execution_arn)
            .map(|(_, execution)| execution)
            .ok_or_else(|| {
                Self::not_found("DescribeExecution", "ExecutionDoesNotExist", execution_arn)
            })?;
        if execution.status.is_running() {
            execution.status = next.unwrap_or(ExecutionStatus::Succeeded);
        }
        let finished = !execution.status.is_running();
        Ok(ExecutionDescription {
            execution_arn: execution_arn.to_string(),
            status: execution.status.clone(),
            output: self.execution_output.clone().filter(|_| finished),
            start_date: Some(Utc::now()),
            stop_date: finished.then(Utc::now),
        })
    }

    async fn list_executions(
        &self,
        state_machine_arn: &str,
    ) -> ServiceResult<Vec<ExecutionSummary>> {
        self.log.record("ListExecutions")?;
        Ok(self
            .lock()
            .executions
            .iter()
            .filter(|(_, execution)| execution.state_machine_arn == state_machine_arn)
            .map(|(arn, execution)| ExecutionSummary {
                name: execution.name.clone(),
                execution_arn: arn.clone(),
                status: execution.status.clone(),
                start_date: Some(Utc::now()),
                stop_date: None,
            })
            .collect())
    }

    async fn get_activity_task(
        &self,
        activity_arn: &str,
        _worker_name: &str,
    ) -> ServiceResult<Option<ActivityTask>> {
        self.log.record("GetActivityTask")?;
        let mut state = self.lock();
        if !state.activities.iter().any(|arn| arn == activity_arn) {
            return Err(Self::not_found(
                "GetActivityTask",
                "ActivityDoesNotExist",
                activity_arn,
            ));
        }
        Ok(state.tasks.pop_front())
    }

    async fn send_task_success(&self, task_token: &str, output: &str) -> ServiceResult<()> {
        self.log.record("SendTaskSuccess")?;
        self.lock()
            .task_results
            .push((task_token.to_string(), output.to_string()));
        Ok(())
    }
}

/// In-memory IAM holding a set of roles.
#[derive(Default)]
pub struct MockIam {
    log: CallLog,
    roles: Mutex<HashMap<String, RoleInfo>>,
}

impl MockIam {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a role that already exists.
    #[must_use]
    pub fn with_role(self, role_name: &str) -> Self {
        self.roles
            .lock()
            .expect("roles lock poisoned")
            .insert(role_name.to_string(), Self::role(role_name));
        self
    }

    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles
            .lock()
            .expect("roles lock poisoned")
            .contains_key(role_name)
    }

    fn role(role_name: &str) -> RoleInfo {
        RoleInfo {
            role_name: role_name.to_string(),
            arn: format!("arn:aws:iam::{MOCK_ACCOUNT}:role/{role_name}"),
        }
    }
}

#[async_trait]
impl IamProvider for MockIam {
    async fn get_role(&self, role_name: &str) -> ServiceResult<RoleInfo> {
        self.log.record("GetRole")?;
        self.roles
            .lock()
            .expect("roles lock poisoned")
            .get(role_name)
            .cloned()
            .ok_or_else(|| {
                ServiceError::from_parts(
                    "GetRole",
                    Some("NoSuchEntity"),
                    Some(&format!("The role with name {role_name} cannot be found.")),
                )
            })
    }

    async fn create_role(
        &self,
        role_name: &str,
        _assume_role_policy: &str,
    ) -> ServiceResult<RoleInfo> {
        self.log.record("CreateRole")?;
        let role = Self::role(role_name);
        self.roles
            .lock()
            .expect("roles lock poisoned")
            .insert(role_name.to_string(), role.clone());
        Ok(role)
    }

    async fn delete_role(&self, role_name: &str) -> ServiceResult<()> {
        self.log.record("DeleteRole")?;
        self.roles
            .lock()
            .expect("roles lock poisoned")
            .remove(role_name);
        Ok(())
    }
}

/// In-memory S3 with buckets and object keys.
#[derive(Default)]
pub struct MockS3 {
    log: CallLog,
    buckets: Mutex<Vec<String>>,
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MockS3 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bucket(self, bucket: &str) -> Self {
        self.buckets
            .lock()
            .expect("buckets lock poisoned")
            .push(bucket.to_string());
        self
    }

    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets
            .lock()
            .expect("buckets lock poisoned")
            .iter()
            .any(|b| b == bucket)
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("objects lock poisoned")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl S3Provider for MockS3 {
    async fn list_buckets(&self) -> ServiceResult<Vec<BucketInfo>> {
        self.log.record("ListBuckets")?;
        Ok(self
            .buckets
            .lock()
            .expect("buckets lock poisoned")
            .iter()
            .map(|name| BucketInfo {
                name: name.clone(),
                creation_date: None,
            })
            .collect())
    }

    async fn create_bucket(&self, bucket: &str) -> ServiceResult<()> {
        self.log.record("CreateBucket")?;
        let mut buckets = self.buckets.lock().expect("buckets lock poisoned");
        if buckets.iter().any(|b| b == bucket) {
            return Err(ServiceError::from_parts(
                "CreateBucket",
                Some("BucketAlreadyOwnedByYou"),
                Some("bucket already exists"),
            ));
        }
        buckets.push(bucket.to_string());
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> ServiceResult<Option<String>> {
        self.log.record("PutObject")?;
        if !self
            .buckets
            .lock()
            .expect("buckets lock poisoned")
            .iter()
            .any(|b| b == bucket)
        {
            return Err(ServiceError::from_parts(
                "PutObject",
                Some("NoSuchBucket"),
                Some("The specified bucket does not exist"),
            ));
        }
        let etag = format!("\"{:x}\"", body.len());
        self.objects
            .lock()
            .expect("objects lock poisoned")
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(Some(etag))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> ServiceResult<()> {
        self.log.record("DeleteObject")?;
        self.objects
            .lock()
            .expect("objects lock poisoned")
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> ServiceResult<()> {
        self.log.record("DeleteBucket")?;
        self.buckets
            .lock()
            .expect("buckets lock poisoned")
            .retain(|b| b != bucket);
        Ok(())
    }
}

/// SQS that accepts every message except the ids marked as failing.
#[derive(Default)]
pub struct MockSqs {
    log: CallLog,
    rejected_ids: HashSet<String>,
    sent: Mutex<Vec<(String, BatchMessage)>>,
}

impl MockSqs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rejecting<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.rejected_ids.extend(ids.into_iter().map(ToString::to_string));
        self
    }

    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    /// `(queue url, message)` for every delivered message.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, BatchMessage)> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }
}

#[async_trait]
impl SqsProvider for MockSqs {
    async fn send_message_batch(
        &self,
        queue_url: &str,
        messages: &[BatchMessage],
    ) -> ServiceResult<BatchSendResult> {
        self.log.record("SendMessageBatch")?;
        let mut result = BatchSendResult::default();
        let mut sent = self.sent.lock().expect("sent lock poisoned");
        for message in messages {
            if self.rejected_ids.contains(&message.id) {
                result.failed.push(BatchFailure {
                    id: message.id.clone(),
                    code: "InvalidMessageContents".to_string(),
                    message: Some("rejected by mock".to_string()),
                    sender_fault: true,
                });
            } else {
                result
                    .successful
                    .push((message.id.clone(), format!("msg-{}", sent.len() + 1)));
                sent.push((queue_url.to_string(), message.clone()));
            }
        }
        Ok(result)
    }
}

/// Records KMS, SES and STS calls; every call succeeds unless configured to
/// fail.
#[derive(Default)]
pub struct MockSecurity {
    log: CallLog,
    requests: Mutex<Vec<String>>,
}

impl MockSecurity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// Main argument of each successful call, formatted as `Operation:value`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    fn remember(&self, operation: &str, value: &str) {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(format!("{operation}:{value}"));
    }
}

#[async_trait]
impl KmsProvider for MockSecurity {
    async fn create_alias(&self, alias_name: &str, target_key_id: &str) -> ServiceResult<()> {
        self.log.record("CreateAlias")?;
        self.remember("CreateAlias", &format!("{alias_name}->{target_key_id}"));
        Ok(())
    }

    async fn revoke_grant(&self, key_id: &str, grant_id: &str) -> ServiceResult<()> {
        self.log.record("RevokeGrant")?;
        self.remember("RevokeGrant", &format!("{key_id}/{grant_id}"));
        Ok(())
    }
}

#[async_trait]
impl SesProvider for MockSecurity {
    async fn create_receipt_rule(&self, rule: &ReceiptRuleSpec) -> ServiceResult<()> {
        self.log.record("CreateReceiptRule")?;
        self.remember(
            "CreateReceiptRule",
            &format!("{}/{}", rule.rule_set_name, rule.rule_name),
        );
        Ok(())
    }

    async fn delete_identity(&self, identity: &str) -> ServiceResult<()> {
        self.log.record("DeleteIdentity")?;
        self.remember("DeleteIdentity", identity);
        Ok(())
    }
}

#[async_trait]
impl StsProvider for MockSecurity {
    async fn assume_role(&self, role_arn: &str, session_name: &str) -> ServiceResult<AssumedRole> {
        self.log.record("AssumeRole")?;
        self.remember("AssumeRole", role_arn);
        let role = role_arn.rsplit('/').next().unwrap_or(role_arn);
        Ok(AssumedRole {
            assumed_role_arn: Some(format!(
                "arn:aws:sts::{MOCK_ACCOUNT}:assumed-role/{role}/{session_name}"
            )),
            access_key_id: "ASIAMOCKACCESSKEY".to_string(),
            expiration: Some(Utc::now()),
        })
    }
}

/// Data services with canned responses: DynamoDB scan items, a Bedrock
/// reply, SageMaker models and MediaConvert jobs.
#[derive(Default)]
pub struct MockData {
    log: CallLog,
    items: Vec<ScanItem>,
    reply: String,
    job_status: Option<String>,
    prompts: Mutex<Vec<ConverseRequest>>,
}

impl MockData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<ScanItem>) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn with_reply(mut self, reply: &str) -> Self {
        self.reply = reply.to_string();
        self
    }

    #[must_use]
    pub fn with_job_status(mut self, status: &str) -> Self {
        self.job_status = Some(status.to_string());
        self
    }

    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.log.failing.insert(operation);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<ConverseRequest> {
        self.prompts.lock().expect("prompts lock poisoned").clone()
    }
}

#[async_trait]
impl DynamoDbProvider for MockData {
    async fn scan(&self, _table_name: &str) -> ServiceResult<Vec<ScanItem>> {
        self.log.record("Scan")?;
        Ok(self.items.clone())
    }
}

#[async_trait]
impl BedrockProvider for MockData {
    async fn converse(&self, request: &ConverseRequest) -> ServiceResult<String> {
        self.log.record("Converse")?;
        self.prompts
            .lock()
            .expect("prompts lock poisoned")
            .push(request.clone());
        Ok(self.reply.clone())
    }
}

#[async_trait]
impl SageMakerProvider for MockData {
    async fn create_model(&self, spec: &ModelSpec) -> ServiceResult<String> {
        self.log.record("CreateModel")?;
        Ok(format!(
            "arn:aws:sagemaker:{MOCK_REGION}:{MOCK_ACCOUNT}:model/{}",
            spec.model_name
        ))
    }
}

#[async_trait]
impl MediaConvertProvider for MockData {
    async fn create_job(&self, _spec: &TranscodeJobSpec) -> ServiceResult<String> {
        self.log.record("CreateJob")?;
        Ok("1700000000000-mock".to_string())
    }

    async fn get_job(&self, job_id: &str) -> ServiceResult<JobInfo> {
        self.log.record("GetJob")?;
        Ok(JobInfo {
            id: job_id.to_string(),
            status: self
                .job_status
                .clone()
                .unwrap_or_else(|| "SUBMITTED".to_string()),
            created_at: Some(Utc::now()),
        })
    }
}

#[must_use]
pub fn make_task(token: &str, message: &str) -> ActivityTask {
    ActivityTask {
        task_token: token.to_string(),
        input: serde_json::json!({ "message": message, "actions": ["question", "done"] })
            .to_string(),
    }
}
