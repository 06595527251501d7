//! Applies planned actions to the remote item.

use super::outcome::{FailedStep, LevelOutcome, ReconciliationReport};
use super::plan::{PermissionAction, ReconciliationPlan};
use crate::remote::{DriveClient, RemoteResult};
use permsync_types::{AccessLevel, GranteeSet, PermissionSetId, RemoteItem};
use tracing::{info, warn};

/// Create, delete and update against one storage target.
#[derive(Debug, Clone, Copy)]
pub struct PermissionMutator<'a> {
    client: DriveClient<'a>,
}

impl<'a> PermissionMutator<'a> {
    /// Creates a mutator.
    pub fn new(client: DriveClient<'a>) -> Self {
        Self { client }
    }

    /// Invites `grantees` at `level`. One POST.
    ///
    /// # Errors
    ///
    /// Empty `grantees` fail without a request; otherwise the mapped
    /// response.
    pub fn create(
        &self,
        level: AccessLevel,
        grantees: &GranteeSet,
        item: &RemoteItem,
    ) -> RemoteResult<()> {
        self.client.invite(item, level, grantees).map(|_| ())
    }

    /// Removes a permission set. One DELETE.
    ///
    /// # Errors
    ///
    /// The mapped response.
    pub fn delete(&self, id: &PermissionSetId, item: &RemoteItem) -> RemoteResult<()> {
        self.client.delete_permission(item, id)
    }

    /// Delete, then create if the delete succeeded.
    ///
    /// # Errors
    ///
    /// The failing call and its error.
    pub fn update(
        &self,
        level: AccessLevel,
        grantees: &GranteeSet,
        id: &PermissionSetId,
        item: &RemoteItem,
    ) -> Result<(), FailedStep> {
        self.delete(id, item).map_err(FailedStep::delete)?;
        self.create(level, grantees, item).map_err(|e| {
            warn!(
                level = %level,
                permission_id = %id,
                "Permission set deleted but re-create failed, level has no grantees"
            );
            FailedStep::create(e)
        })
    }

    /// Routes one level's action.
    pub fn apply(
        &self,
        level: AccessLevel,
        action: &PermissionAction,
        item: &RemoteItem,
    ) -> LevelOutcome {
        let result = match action {
            PermissionAction::NoOp => return LevelOutcome::NoOp,
            PermissionAction::Create { grantees } => self
                .create(level, grantees, item)
                .map(|()| LevelOutcome::Created)
                .map_err(FailedStep::create),
            PermissionAction::Delete { id } => self
                .delete(id, item)
                .map(|()| LevelOutcome::Deleted)
                .map_err(FailedStep::delete),
            PermissionAction::Update { id, grantees } => self
                .update(level, grantees, id, item)
                .map(|()| LevelOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                info!(level = %level, outcome = outcome.name(), "Permission level reconciled");
                outcome
            }
            Err(failed) => {
                warn!(
                    level = %level,
                    step = %failed.step,
                    kind = %failed.error.kind(),
                    error = %failed.error,
                    "Permission level failed"
                );
                LevelOutcome::Failed(failed)
            }
        }
    }

    /// Applies every step in order; a failed level does not stop the
    /// next one.
    #[must_use]
    pub fn apply_plan(&self, plan: &ReconciliationPlan, item: &RemoteItem) -> ReconciliationReport {
        let mut report = ReconciliationReport::new(item.clone());
        for step in plan.steps() {
            report.push(step.level, self.apply(step.level, &step.action, item));
        }
        report
    }
}
