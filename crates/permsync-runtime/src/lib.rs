//! permsync runtime: permission reconciliation against a remote drive API.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Value Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  permsync-types : AccessLevel, GranteeSet, Storage, ids     │
//! │  permsync-auth  : BearerToken, TokenProvider, TokenScope    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  config/    : layered TOML + env configuration              │
//! │  http/      : HttpTransport, UreqTransport                  │
//! │  remote/    : DriveClient, endpoints, status mapping        │
//! │  reconcile/ : fetch → plan → mutate, SetPermissionsCommand  │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! │  (permsync-cli)                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`reconcile`] - Reconciliation
//!
//! - [`SetPermissionsCommand`](reconcile::SetPermissionsCommand): entry point
//! - [`ReconciliationPlan`](reconcile::ReconciliationPlan): per-level actions
//! - [`ReconciliationReport`](reconcile::ReconciliationReport): per-level outcomes
//!
//! ## [`remote`] - Drive API
//!
//! - [`DriveClient`](remote::DriveClient): authenticated GET/POST/DELETE
//! - [`RemoteError`](remote::RemoteError): status classification
//!
//! ## [`http`] - Transport
//!
//! - [`HttpTransport`](http::HttpTransport): blocking send trait
//! - [`UreqTransport`](http::UreqTransport): production transport
//!
//! ## [`config`] - Configuration Management
//!
//! - [`ConfigLoader`](config::ConfigLoader): file and env layering
//! - [`PermsyncConfig`](config::PermsyncConfig): merged settings
//!
//! ## [`testing`] - Test doubles
//!
//! - [`RecordingTransport`](testing::RecordingTransport): scripted transport

pub mod config;
pub mod http;
pub mod reconcile;
pub mod remote;
pub mod testing;

pub use config::{ConfigError, ConfigLoader, MissingItemPolicy, PermsyncConfig};
pub use http::{HttpTransport, TransportError, UreqTransport};
pub use reconcile::{
    LevelOutcome, ReconcileError, ReconciliationPlan, ReconciliationReport, SetPermissionsCommand,
};
pub use remote::{ExistingPermission, RemoteError};
