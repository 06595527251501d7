//! Caller-supplied desired permission state.

use crate::{AccessLevel, ErrorCode, GranteeSet, UnknownAccessLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error building [`DesiredPermissions`] from untyped input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesiredPermissionsError {
    /// A key other than `read` / `write` was supplied.
    #[error(transparent)]
    UnknownAccessLevel(#[from] UnknownAccessLevel),
}

impl ErrorCode for DesiredPermissionsError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownAccessLevel(_) => "DESIRED_UNKNOWN_ACCESS_LEVEL",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Desired grantees per access level for one remote item.
///
/// Only the levels present in the map are reconciled; a level that is
/// absent is left untouched on the remote side, while a level mapped to
/// an empty [`GranteeSet`] is revoked.
///
/// Iteration order is `read` then `write`, independent of how the input
/// was declared.
///
/// # Example
///
/// ```
/// use permsync_types::{AccessLevel, DesiredPermissions, GranteeSet};
///
/// let desired: DesiredPermissions =
///     serde_json::from_str(r#"{"write": ["u1"], "read": []}"#).unwrap();
///
/// let levels: Vec<AccessLevel> = desired.iter().map(|(level, _)| level).collect();
/// assert_eq!(levels, vec![AccessLevel::Read, AccessLevel::Write]);
///
/// assert!(serde_json::from_str::<DesiredPermissions>(r#"{"owner": []}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, GranteeSet>")]
pub struct DesiredPermissions(BTreeMap<AccessLevel, GranteeSet>);

impl DesiredPermissions {
    /// Creates an empty desired state (reconciles nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the desired grantees for a level, builder style.
    #[must_use]
    pub fn with(mut self, level: AccessLevel, grantees: GranteeSet) -> Self {
        self.0.insert(level, grantees);
        self
    }

    /// Sets the desired grantees for a level.
    pub fn set(&mut self, level: AccessLevel, grantees: GranteeSet) {
        self.0.insert(level, grantees);
    }

    /// Returns the desired grantees for a level, if that level is managed.
    #[must_use]
    pub fn get(&self, level: AccessLevel) -> Option<&GranteeSet> {
        self.0.get(&level)
    }

    /// Iterates managed levels in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (AccessLevel, &GranteeSet)> {
        self.0.iter().map(|(level, set)| (*level, set))
    }

    /// Number of managed levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no level is managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, GranteeSet>> for DesiredPermissions {
    type Error = DesiredPermissionsError;

    fn try_from(raw: BTreeMap<String, GranteeSet>) -> Result<Self, Self::Error> {
        let mut levels = BTreeMap::new();
        for (key, grantees) in raw {
            let level: AccessLevel = key.parse()?;
            levels.insert(level, grantees);
        }
        Ok(Self(levels))
    }
}
