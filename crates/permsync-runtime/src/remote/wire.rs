//! JSON shapes exchanged with the drive API.

use permsync_types::{AccessLevel, GranteeSet, PermissionSetId};
use serde::{Deserialize, Serialize};

/// A permission record as listed on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingPermission {
    /// Permission set id.
    pub id: PermissionSetId,
    /// Roles granted, most significant first.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl ExistingPermission {
    /// Creates a record.
    pub fn new(id: impl Into<PermissionSetId>, roles: &[&str]) -> Self {
        Self {
            id: id.into(),
            roles: roles.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// First role, which decides the access level this record stands for.
    #[must_use]
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

/// Body of `GET .../permissions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PermissionList {
    #[serde(default)]
    pub value: Vec<ExistingPermission>,
}

/// Body of `POST .../invite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InviteRequest<'a> {
    pub require_sign_in: bool,
    pub send_invitation: bool,
    pub roles: [&'static str; 1],
    pub recipients: Vec<Recipient<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Recipient<'a> {
    pub object_id: &'a str,
}

impl<'a> InviteRequest<'a> {
    /// Silent, sign-in-required invitation of `grantees` at `level`.
    pub fn new(level: AccessLevel, grantees: &'a GranteeSet) -> Self {
        Self {
            require_sign_in: true,
            send_invitation: false,
            roles: [level.as_role()],
            recipients: grantees
                .iter()
                .map(|g| Recipient {
                    object_id: g.as_str(),
                })
                .collect(),
        }
    }
}
