use std::fmt::Write as _;
use std::time::{Duration, Instant};

use scenario_core::ResourceHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Running, or finished without error.
    Executed,
    Failed,
    /// Every resource the step created was cleaned up.
    Compensated,
    /// At least one of the step's compensations failed.
    CompensationFailed,
}

impl StepStatus {
    /// Marker used in [`ScenarioAuditLog::summary`].
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Executed => "✓",
            Self::Failed => "✗",
            Self::Compensated => "↩",
            Self::CompensationFailed => "⚠",
        }
    }

    fn after_compensation(self, succeeded: bool) -> Self {
        if self == Self::CompensationFailed || !succeeded {
            Self::CompensationFailed
        } else {
            Self::Compensated
        }
    }
}

#[derive(Debug)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started_at: Instant,
    /// Last time the step changed state, by execution or compensation.
    pub completed_at: Option<Instant>,
    /// Resources the step reported when it succeeded.
    pub resources_created: usize,
}

impl StepRecord {
    /// Time from start until the step last changed state.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at
            .map(|done| done.saturating_duration_since(self.started_at))
    }
}

/// One compensation attempt, in the order attempts ran.
#[derive(Debug)]
pub struct CompensationRecord {
    pub step: String,
    pub resource: ResourceHandle,
    pub description: String,
    pub succeeded: bool,
    pub at: Instant,
}

/// Every step a scenario ran and every compensation it attempted.
#[derive(Debug, Default)]
pub struct ScenarioAuditLog {
    records: Vec<StepRecord>,
    compensations: Vec<CompensationRecord>,
}

impl ScenarioAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
            resources_created: 0,
        });
    }

    pub(crate) fn record_failure(&mut self) {
        self.finish_last(StepStatus::Failed);
    }

    pub(crate) fn record_success(&mut self, resources_created: usize) {
        if let Some(record) = self.finish_last(StepStatus::Executed) {
            record.resources_created = resources_created;
        }
    }

    fn finish_last(&mut self, status: StepStatus) -> Option<&mut StepRecord> {
        let record = self.records.last_mut()?;
        record.status = status;
        record.completed_at = Some(Instant::now());
        Some(record)
    }

    /// Record a compensation of a resource created by the step at
    /// `step_index`. A failed compensation marks the step for good.
    pub(crate) fn record_compensation(
        &mut self,
        step_index: usize,
        resource: &ResourceHandle,
        description: String,
        succeeded: bool,
    ) {
        let at = Instant::now();
        let step = self
            .records
            .get_mut(step_index)
            .map(|record| {
                record.status = record.status.after_compensation(succeeded);
                record.completed_at = Some(at);
                record.name.clone()
            })
            .unwrap_or_default();

        self.compensations.push(CompensationRecord {
            step,
            resource: resource.clone(),
            description,
            succeeded,
            at,
        });
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    #[must_use]
    pub fn compensations(&self) -> &[CompensationRecord] {
        &self.compensations
    }

    /// One line per step, then one indented line per compensation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let _ = writeln!(out, "{} {}", record.status.symbol(), record.name);
        }
        for compensation in &self.compensations {
            let symbol = if compensation.succeeded {
                StepStatus::Compensated.symbol()
            } else {
                StepStatus::CompensationFailed.symbol()
            };
            let _ = writeln!(
                out,
                "  {symbol} {}: {}",
                compensation.step, compensation.description
            );
        }
        out.truncate(out.trim_end().len());
        out
    }
}
