//! Reconciliation entry point.

use super::error::ReconcileError;
use super::fetcher::{ExistingIds, PermissionFetcher};
use super::mutator::PermissionMutator;
use super::outcome::ReconciliationReport;
use super::plan::ReconciliationPlan;
use crate::config::MissingItemPolicy;
use crate::http::HttpTransport;
use crate::remote::{DriveClient, ExistingPermission};
use permsync_auth::{TokenProvider, TokenScope};
use permsync_types::{DesiredPermissions, RemoteItem, Storage};
use tracing::{info, info_span};
use uuid::Uuid;

/// Brings the `read`/`write` permission sets of remote items to a
/// desired state.
///
/// Each call acquires one token, fetches the current records once,
/// then processes the requested levels in `read`, `write` order. The
/// command keeps no state between calls.
///
/// # Example
///
/// ```
/// use permsync_auth::StaticTokenProvider;
/// use permsync_runtime::reconcile::{LevelOutcome, SetPermissionsCommand};
/// use permsync_runtime::testing::{permission_list, RecordingTransport};
/// use permsync_types::{AccessLevel, DesiredPermissions, GranteeSet, RemoteItem, Storage};
///
/// let transport = RecordingTransport::new()
///     .respond_json(&permission_list(&[]))
///     .respond(200, "{}");
/// let tokens = StaticTokenProvider::new("secret");
/// let command = SetPermissionsCommand::new(
///     Storage::new("https://graph.example.com", "b!drive"),
///     &transport,
///     &tokens,
/// );
///
/// let desired = DesiredPermissions::new()
///     .with(AccessLevel::Read, GranteeSet::new())
///     .with(AccessLevel::Write, ["u1"].into_iter().collect());
/// let report = command.call(&RemoteItem::new("01ITEM"), &desired).unwrap();
///
/// assert_eq!(report.get(AccessLevel::Read), Some(&LevelOutcome::NoOp));
/// assert_eq!(report.get(AccessLevel::Write), Some(&LevelOutcome::Created));
/// assert_eq!(transport.request_count(), 2);
/// ```
#[derive(Debug)]
pub struct SetPermissionsCommand<'a> {
    storage: Storage,
    transport: &'a dyn HttpTransport,
    tokens: &'a dyn TokenProvider,
    missing_item: MissingItemPolicy,
}

impl<'a> SetPermissionsCommand<'a> {
    /// Creates a command for one storage target.
    pub fn new(
        storage: Storage,
        transport: &'a dyn HttpTransport,
        tokens: &'a dyn TokenProvider,
    ) -> Self {
        Self {
            storage,
            transport,
            tokens,
            missing_item: MissingItemPolicy::default(),
        }
    }

    /// Sets how a 404 on fetch is handled.
    #[must_use]
    pub fn with_missing_item(mut self, policy: MissingItemPolicy) -> Self {
        self.missing_item = policy;
        self
    }

    /// Reconciles `item` towards `desired`.
    ///
    /// Levels absent from `desired` are left untouched. A failure on one
    /// level is recorded in the report and does not stop the next.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::Token`] before any request, or
    /// [`ReconcileError::Fetch`] before any mutation.
    pub fn call(
        &self,
        item: &RemoteItem,
        desired: &DesiredPermissions,
    ) -> Result<ReconciliationReport, ReconcileError> {
        let run_id = Uuid::new_v4();
        self.run(run_id, "apply", item, |client| {
            let plan = self.build_plan(client, item, desired)?;
            let report = PermissionMutator::new(client)
                .apply_plan(&plan, item)
                .with_run_id(run_id.to_string());
            info!(
                success = report.is_success(),
                levels = plan.steps().len(),
                "Reconciliation finished"
            );
            Ok(report)
        })
    }

    /// Fetches and diffs without mutating.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn plan(
        &self,
        item: &RemoteItem,
        desired: &DesiredPermissions,
    ) -> Result<ReconciliationPlan, ReconcileError> {
        self.run(Uuid::new_v4(), "plan", item, |client| {
            self.build_plan(client, item, desired)
        })
    }

    /// Current permission records of `item`.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn fetch(&self, item: &RemoteItem) -> Result<Vec<ExistingPermission>, ReconcileError> {
        self.run(Uuid::new_v4(), "show", item, |client| {
            PermissionFetcher::new(client, self.missing_item)
                .fetch(item)
                .map_err(ReconcileError::Fetch)
        })
    }

    fn build_plan(
        &self,
        client: DriveClient<'_>,
        item: &RemoteItem,
        desired: &DesiredPermissions,
    ) -> Result<ReconciliationPlan, ReconcileError> {
        let existing = PermissionFetcher::new(client, self.missing_item)
            .fetch(item)
            .map_err(ReconcileError::Fetch)?;
        Ok(ReconciliationPlan::build(
            desired,
            &ExistingIds::from_permissions(&existing),
        ))
    }

    /// Runs `f` inside a logging span with a token held for its duration.
    fn run<T>(
        &self,
        run_id: Uuid,
        mode: &'static str,
        item: &RemoteItem,
        f: impl FnOnce(DriveClient<'_>) -> Result<T, ReconcileError>,
    ) -> Result<T, ReconcileError> {
        let span = info_span!(
            "set_permissions",
            run = %run_id,
            mode,
            item = %item,
            drive = %self.storage.drive_id()
        );
        let _enter = span.enter();

        let scope = TokenScope::acquire(self.tokens, &self.storage)?;
        let client = DriveClient::new(self.transport, &self.storage, scope.token());
        f(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use permsync_auth::{EnvTokenProvider, StaticTokenProvider};
    use permsync_types::{AccessLevel, ErrorCode, GranteeSet};

    fn storage() -> Storage {
        Storage::new("http://localhost:9", "d")
    }

    #[test]
    fn token_failure_sends_nothing() {
        let transport = RecordingTransport::new();
        let tokens = EnvTokenProvider::new("PERMSYNC_TEST_TOKEN_THAT_IS_NEVER_SET");
        let command = SetPermissionsCommand::new(storage(), &transport, &tokens);
        let desired = DesiredPermissions::new().with(AccessLevel::Read, GranteeSet::new());

        let err = command.call(&RemoteItem::new("i"), &desired).unwrap_err();
        assert_eq!(err.code(), "AUTH_TOKEN_MISSING");
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn plan_does_not_mutate() {
        let transport = RecordingTransport::new()
            .respond(200, r#"{"value":[{"id":"p1","roles":["write"]}]}"#);
        let tokens = StaticTokenProvider::new("t");
        let command = SetPermissionsCommand::new(storage(), &transport, &tokens);
        let desired = DesiredPermissions::new().with(AccessLevel::Write, GranteeSet::new());

        let plan = command.plan(&RemoteItem::new("i"), &desired).unwrap();
        assert_eq!(plan.request_count(), 1);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn fetch_returns_records() {
        let transport = RecordingTransport::new()
            .respond(200, r#"{"value":[{"id":"p1","roles":["read"]}]}"#);
        let tokens = StaticTokenProvider::new("t");
        let command = SetPermissionsCommand::new(storage(), &transport, &tokens);

        let records = command.fetch(&RemoteItem::new("i")).unwrap();
        assert_eq!(records, vec![ExistingPermission::new("p1", &["read"])]);
    }

    #[test]
    fn missing_item_policy_is_applied() {
        let transport = RecordingTransport::new().respond(404, "");
        let tokens = StaticTokenProvider::new("t");
        let command = SetPermissionsCommand::new(storage(), &transport, &tokens)
            .with_missing_item(MissingItemPolicy::TreatAsEmpty);

        assert!(command.fetch(&RemoteItem::new("i")).unwrap().is_empty());
    }
}
