use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of AWS resource a scenario step created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ResourceKind {
    Role,
    Activity,
    StateMachine,
    Execution,
    Bucket,
    Object,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Activity => "activity",
            Self::StateMachine => "state-machine",
            Self::Execution => "execution",
            Self::Bucket => "bucket",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a resource created while a scenario runs.
///
/// Two handles refer to the same resource when their kind and identifier
/// match; the creation timestamp is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    pub identifier: String,
    pub created_at: DateTime<Utc>,
}

impl ResourceHandle {
    #[must_use]
    pub fn new(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            kind: self.kind,
            identifier: self.identifier.clone(),
        }
    }

    #[must_use]
    pub fn is_same_resource(&self, other: &Self) -> bool {
        self.kind == other.kind && self.identifier == other.identifier
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_resource(other)
    }
}

impl Eq for ResourceHandle {}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.identifier)
    }
}

/// The identity of a resource: its kind and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub identifier: String,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.identifier)
    }
}
