//! Per-level results of a reconciliation run.

use crate::remote::RemoteError;
use permsync_types::{AccessLevel, ErrorCode, FailureKind, RemoteItem};
use serde_json::{json, Map, Value};
use std::fmt;

/// Remote call that failed within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStep {
    Create,
    Delete,
}

impl MutationStep {
    /// snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed mutation and the call it failed on.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedStep {
    pub step: MutationStep,
    pub error: RemoteError,
}

impl FailedStep {
    /// Failure during invite.
    pub fn create(error: RemoteError) -> Self {
        Self {
            step: MutationStep::Create,
            error,
        }
    }

    /// Failure during delete.
    pub fn delete(error: RemoteError) -> Self {
        Self {
            step: MutationStep::Delete,
            error,
        }
    }
}

/// Result for one access level.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelOutcome {
    NoOp,
    Created,
    Updated,
    Deleted,
    /// An update whose create failed has already removed the previous
    /// grantees of this level.
    Failed(FailedStep),
}

impl LevelOutcome {
    /// snake_case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoOp => "no_op",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Failed(_) => "failed",
        }
    }

    /// True for everything but [`LevelOutcome::Failed`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&FailedStep> {
        match self {
            Self::Failed(failed) => Some(failed),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("outcome".into(), json!(self.name()));
        if let Self::Failed(failed) = self {
            obj.insert("step".into(), json!(failed.step.as_str()));
            obj.insert("kind".into(), json!(failed.error.kind().as_str()));
            obj.insert("code".into(), json!(failed.error.code()));
            obj.insert("message".into(), json!(failed.error.to_string()));
            if let Some(status) = failed.error.status() {
                obj.insert("status".into(), json!(status));
            }
        }
        Value::Object(obj)
    }
}

/// Outcomes of one invocation, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationReport {
    item: RemoteItem,
    run_id: Option<String>,
    outcomes: Vec<(AccessLevel, LevelOutcome)>,
}

impl ReconciliationReport {
    /// Creates an empty report for `item`.
    #[must_use]
    pub fn new(item: RemoteItem) -> Self {
        Self {
            item,
            run_id: None,
            outcomes: Vec::new(),
        }
    }

    /// Tags the report with the invocation id used in logs.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Records a level's outcome.
    pub fn push(&mut self, level: AccessLevel, outcome: LevelOutcome) {
        self.outcomes.push((level, outcome));
    }

    /// Target item.
    #[must_use]
    pub fn item(&self) -> &RemoteItem {
        &self.item
    }

    /// Invocation id, when set.
    #[must_use]
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Outcomes in processing order.
    pub fn outcomes(&self) -> impl Iterator<Item = (AccessLevel, &LevelOutcome)> {
        self.outcomes.iter().map(|(level, outcome)| (*level, outcome))
    }

    /// Outcome for `level`, if it was processed.
    #[must_use]
    pub fn get(&self, level: AccessLevel) -> Option<&LevelOutcome> {
        self.outcomes
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, outcome)| outcome)
    }

    /// True when every level succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_success())
    }

    /// First failed level in processing order.
    #[must_use]
    pub fn first_failure(&self) -> Option<(AccessLevel, &FailedStep)> {
        self.outcomes
            .iter()
            .find_map(|(level, outcome)| outcome.failure().map(|f| (*level, f)))
    }

    /// Overall failure category, taken from the first failed level.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.first_failure().map(|(_, f)| f.error.kind())
    }

    /// Machine-readable form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let levels: Map<String, Value> = self
            .outcomes
            .iter()
            .map(|(level, outcome)| (level.to_string(), outcome.to_json()))
            .collect();
        let mut obj = json!({
            "item": self.item.as_str(),
            "success": self.is_success(),
            "levels": levels,
        });
        if let (Some(run_id), Value::Object(map)) = (&self.run_id, &mut obj) {
            map.insert("run_id".into(), json!(run_id));
        }
        obj
    }
}
