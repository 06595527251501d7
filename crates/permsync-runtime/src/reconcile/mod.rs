//! Permission reconciliation.
//!
//! # Architecture
//!
//! ```text
//! SetPermissionsCommand::call(item, desired)
//!     │
//!     ├─ TokenScope::acquire ─────────────── TokenError → abort
//!     │
//!     ├─ PermissionFetcher::fetch (GET) ──── RemoteError → abort
//!     │
//!     ├─ ExistingIds::from_permissions
//!     ├─ ReconciliationPlan::build           (NoOp/Create/Update/Delete)
//!     │
//!     └─ PermissionMutator::apply_plan       read, then write
//!            ├─ Create: POST invite
//!            ├─ Delete: DELETE permission
//!            └─ Update: DELETE, then POST if the DELETE succeeded
//!                   │
//!                   ▼
//!            ReconciliationReport (per-level LevelOutcome)
//! ```

mod command;
mod error;
mod fetcher;
mod mutator;
mod outcome;
mod plan;

pub use command::SetPermissionsCommand;
pub use error::ReconcileError;
pub use fetcher::{ExistingIds, PermissionFetcher};
pub use mutator::PermissionMutator;
pub use outcome::{FailedStep, LevelOutcome, MutationStep, ReconciliationReport};
pub use plan::{PermissionAction, PlannedStep, ReconciliationPlan};
