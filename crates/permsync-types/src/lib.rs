//! Core types for permsync.
//!
//! permsync reconciles the read/write grantees of an item in a remote
//! drive (a OneDrive-style API) with a caller-supplied desired state.
//! This crate holds the value types shared by every layer.
//!
//! # Crate Architecture
//!
//! ```text
//! permsync-types    : AccessLevel, GranteeSet, ids, Storage, ErrorCode  ◄── HERE
//!     ↑
//! permsync-auth     : BearerToken, TokenProvider, TokenScope
//!     ↑
//! permsync-runtime  : config, HTTP transport, fetch / diff / mutate
//!     ↑
//! permsync-cli      : `permsync` binary
//! ```
//!
//! # Example
//!
//! ```
//! use permsync_types::{AccessLevel, DesiredPermissions, GranteeSet, RemoteItem};
//!
//! let item = RemoteItem::new("01ITEM");
//! let desired = DesiredPermissions::new()
//!     .with(AccessLevel::Read, GranteeSet::new())
//!     .with(AccessLevel::Write, ["u1"].into_iter().collect());
//!
//! assert_eq!(desired.len(), 2);
//! assert_eq!(item.as_str(), "01ITEM");
//! ```

pub mod access;
pub mod desired;
pub mod error;
pub mod grantee;
pub mod id;
pub mod storage;

pub use access::{AccessLevel, UnknownAccessLevel};
pub use desired::{DesiredPermissions, DesiredPermissionsError};
pub use error::{assert_error_code, assert_error_codes, ErrorCode, FailureKind};
pub use grantee::GranteeSet;
pub use id::{DriveId, GranteeId, PermissionSetId, RemoteItem};
pub use storage::{Storage, DEFAULT_API_VERSION};
