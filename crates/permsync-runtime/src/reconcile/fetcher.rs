//! Current-state retrieval.

use crate::config::MissingItemPolicy;
use crate::remote::{DriveClient, ExistingPermission, RemoteError, RemoteResult};
use permsync_types::{AccessLevel, PermissionSetId, RemoteItem};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Reads the permission records of an item.
#[derive(Debug, Clone, Copy)]
pub struct PermissionFetcher<'a> {
    client: DriveClient<'a>,
    missing_item: MissingItemPolicy,
}

impl<'a> PermissionFetcher<'a> {
    /// Creates a fetcher.
    pub fn new(client: DriveClient<'a>, missing_item: MissingItemPolicy) -> Self {
        Self {
            client,
            missing_item,
        }
    }

    /// One GET, no retries.
    ///
    /// # Errors
    ///
    /// Any non-success outcome, except a 404 under
    /// [`MissingItemPolicy::TreatAsEmpty`], which yields an empty list.
    pub fn fetch(&self, item: &RemoteItem) -> RemoteResult<Vec<ExistingPermission>> {
        match self.client.list_permissions(item) {
            Ok(permissions) => {
                debug!(item = %item, count = permissions.len(), "Fetched permissions");
                Ok(permissions)
            }
            Err(RemoteError::NotFound) if self.missing_item == MissingItemPolicy::TreatAsEmpty => {
                info!(item = %item, "Item not found, treating as having no permissions");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Existing permission set id per access level.
///
/// A level with no matching record has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingIds(BTreeMap<AccessLevel, PermissionSetId>);

impl ExistingIds {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id for `level`.
    #[must_use]
    pub fn with(mut self, level: AccessLevel, id: impl Into<PermissionSetId>) -> Self {
        self.0.insert(level, id.into());
        self
    }

    /// Picks, per level, the first record whose first role names it.
    ///
    /// Extra matches are ignored with a warning.
    #[must_use]
    pub fn from_permissions(permissions: &[ExistingPermission]) -> Self {
        let mut ids = BTreeMap::new();
        for level in AccessLevel::ALL {
            let mut matches = permissions
                .iter()
                .filter(|p| p.primary_role() == Some(level.as_role()));

            let Some(first) = matches.next() else {
                continue;
            };
            let ignored: Vec<&str> = matches.map(|p| p.id.as_str()).collect();
            if !ignored.is_empty() {
                warn!(
                    level = %level,
                    permission_id = %first.id,
                    ignored = ?ignored,
                    "Multiple permission records for role, using the first"
                );
            }
            ids.insert(level, first.id.clone());
        }
        Self(ids)
    }

    /// Existing id for `level`.
    #[must_use]
    pub fn get(&self, level: AccessLevel) -> Option<&PermissionSetId> {
        self.0.get(&level)
    }

    /// True when no level has an id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
