//! Sequential scenario runner with reverse-order compensation.
//!
//! A scenario is an ordered list of async steps. Each step transforms the
//! previous step's output into its own output and may report the resources it
//! created. Reported resources are held by a [`ResourceTracker`]; if a later
//! step fails, or the run is cancelled between steps, every tracked resource
//! is compensated in reverse creation order. A successful run keeps its
//! resources tracked until the caller asks for a [`Scenario::teardown`].

mod audit;
mod builder;
mod erased;
mod error;
mod result;
mod scenario;
mod step;
mod tracker;

pub use audit::{CompensationRecord, ScenarioAuditLog, StepRecord, StepStatus};
pub use builder::{Empty, HasSteps, ScenarioBuilder};
pub use error::{CompensationError, DuplicateResourceError, ScenarioError};
pub use result::ScenarioResult;
pub use scenario::Scenario;
pub use scenario_core::{ResourceHandle, ResourceKey, ResourceKind};
pub use step::{ScenarioStep, StepOutput};
pub use tracker::ResourceTracker;
