//! Desired vs existing state decisions.
//!
//! | desired set | existing id | action |
//! |-------------|-------------|--------|
//! | empty       | none        | [`PermissionAction::NoOp`] |
//! | empty       | some        | [`PermissionAction::Delete`] |
//! | non-empty   | none        | [`PermissionAction::Create`] |
//! | non-empty   | some        | [`PermissionAction::Update`] |

use super::fetcher::ExistingIds;
use permsync_types::{AccessLevel, DesiredPermissions, GranteeSet, PermissionSetId};
use serde_json::{json, Map, Value};

/// The single action taken for one access level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionAction {
    /// Nothing to do, no remote call.
    NoOp,
    /// Invite the grantees.
    Create { grantees: GranteeSet },
    /// Delete the existing set, then invite the grantees.
    Update {
        id: PermissionSetId,
        grantees: GranteeSet,
    },
    /// Delete the existing set.
    Delete { id: PermissionSetId },
}

impl PermissionAction {
    /// Decides the action for one level.
    #[must_use]
    pub fn decide(grantees: &GranteeSet, existing: Option<&PermissionSetId>) -> Self {
        match (grantees.is_empty(), existing) {
            (true, None) => Self::NoOp,
            (true, Some(id)) => Self::Delete { id: id.clone() },
            (false, None) => Self::Create {
                grantees: grantees.clone(),
            },
            (false, Some(id)) => Self::Update {
                id: id.clone(),
                grantees: grantees.clone(),
            },
        }
    }

    /// snake_case action name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoOp => "no_op",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }

    /// Remote calls issued when every call succeeds.
    #[must_use]
    pub fn request_count(&self) -> usize {
        match self {
            Self::NoOp => 0,
            Self::Create { .. } | Self::Delete { .. } => 1,
            Self::Update { .. } => 2,
        }
    }

    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("action".into(), json!(self.name()));
        match self {
            Self::NoOp => {}
            Self::Create { grantees } => {
                obj.insert("grantees".into(), json!(grantees));
            }
            Self::Update { id, grantees } => {
                obj.insert("permission_id".into(), json!(id));
                obj.insert("grantees".into(), json!(grantees));
            }
            Self::Delete { id } => {
                obj.insert("permission_id".into(), json!(id));
            }
        }
        Value::Object(obj)
    }
}

/// One level's planned action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub level: AccessLevel,
    pub action: PermissionAction,
}

/// Ordered actions for every level present in the desired input.
///
/// Levels absent from the input are left alone; steps are in
/// `read`, `write` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    steps: Vec<PlannedStep>,
}

impl ReconciliationPlan {
    /// Builds the plan.
    #[must_use]
    pub fn build(desired: &DesiredPermissions, existing: &ExistingIds) -> Self {
        let steps = desired
            .iter()
            .map(|(level, grantees)| PlannedStep {
                level,
                action: PermissionAction::decide(grantees, existing.get(level)),
            })
            .collect();
        Self { steps }
    }

    /// Steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Action for `level`, if the level was requested.
    #[must_use]
    pub fn action(&self, level: AccessLevel) -> Option<&PermissionAction> {
        self.steps
            .iter()
            .find(|s| s.level == level)
            .map(|s| &s.action)
    }

    /// True when no step calls the remote.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.steps
            .iter()
            .all(|s| s.action == PermissionAction::NoOp)
    }

    /// Mutating calls issued when every call succeeds.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.steps.iter().map(|s| s.action.request_count()).sum()
    }

    /// JSON object keyed by level.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let levels: Map<String, Value> = self
            .steps
            .iter()
            .map(|s| (s.level.to_string(), s.action.to_json()))
            .collect();
        json!({
            "noop": self.is_noop(),
            "requests": self.request_count(),
            "levels": levels,
        })
    }
}
