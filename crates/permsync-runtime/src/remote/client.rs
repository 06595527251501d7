//! Drive permission API client.

use super::endpoint::{invite_url, permission_url, permissions_url};
use super::response::{map_response, RemoteError, RemoteResult};
use super::wire::{ExistingPermission, InviteRequest, PermissionList};
use crate::http::{HttpMethod, HttpRequest, HttpTransport};
use permsync_auth::BearerToken;
use permsync_types::{AccessLevel, GranteeSet, PermissionSetId, RemoteItem, Storage};
use serde_json::Value;
use tracing::debug;

/// Issues authenticated permission calls for one storage target.
///
/// The token is borrowed for the lifetime of the client; every request
/// carries it as a bearer header.
#[derive(Debug, Clone, Copy)]
pub struct DriveClient<'a> {
    transport: &'a dyn HttpTransport,
    storage: &'a Storage,
    token: &'a BearerToken,
}

impl<'a> DriveClient<'a> {
    /// Creates a client.
    pub fn new(
        transport: &'a dyn HttpTransport,
        storage: &'a Storage,
        token: &'a BearerToken,
    ) -> Self {
        Self {
            transport,
            storage,
            token,
        }
    }

    /// `GET .../permissions`.
    ///
    /// # Errors
    ///
    /// Non-success statuses, transport failures and undecodable bodies.
    pub fn list_permissions(&self, item: &RemoteItem) -> RemoteResult<Vec<ExistingPermission>> {
        let url = permissions_url(self.storage, item);
        let payload = self.execute(HttpRequest::new(HttpMethod::Get, url))?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };
        let list: PermissionList =
            serde_json::from_value(payload).map_err(|e| RemoteError::malformed(e.to_string()))?;
        Ok(list.value)
    }

    /// `POST .../invite` granting `level` to every grantee.
    ///
    /// # Errors
    ///
    /// [`RemoteError::EmptyRecipients`] without any request when
    /// `grantees` is empty; otherwise the mapped response.
    pub fn invite(
        &self,
        item: &RemoteItem,
        level: AccessLevel,
        grantees: &GranteeSet,
    ) -> RemoteResult<Option<Value>> {
        if grantees.is_empty() {
            return Err(RemoteError::EmptyRecipients { level });
        }

        let body = serde_json::to_string(&InviteRequest::new(level, grantees))
            .map_err(|e| RemoteError::malformed(e.to_string()))?;
        let url = invite_url(self.storage, item);
        self.execute(HttpRequest::new(HttpMethod::Post, url).body(body))
    }

    /// `DELETE .../permissions/{id}`.
    ///
    /// # Errors
    ///
    /// The mapped response.
    pub fn delete_permission(&self, item: &RemoteItem, id: &PermissionSetId) -> RemoteResult<()> {
        let url = permission_url(self.storage, item, id);
        self.execute(HttpRequest::new(HttpMethod::Delete, url))
            .map(|_| ())
    }

    fn execute(&self, request: HttpRequest) -> RemoteResult<Option<Value>> {
        let request = request
            .header("Authorization", self.token.authorization_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");

        let response = self.transport.send(&request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "drive API call"
        );
        map_response(&response)
    }
}
