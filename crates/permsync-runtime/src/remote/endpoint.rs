//! Drive item permission URLs.
//!
//! ```text
//! {origin}/{api_version}/drives/{drive}/items/{item}/permissions
//! {origin}/{api_version}/drives/{drive}/items/{item}/permissions/{id}
//! {origin}/{api_version}/drives/{drive}/items/{item}/invite
//! ```
//!
//! `drive`, `item` and `id` are percent-encoded as single path segments.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use permsync_types::{PermissionSetId, RemoteItem, Storage};

/// Bytes that cannot appear literally inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn item_url(storage: &Storage, item: &RemoteItem) -> String {
    format!(
        "{}/drives/{}/items/{}",
        storage.base_url(),
        utf8_percent_encode(storage.drive_id().as_str(), SEGMENT),
        utf8_percent_encode(item.as_str(), SEGMENT)
    )
}

/// Permission list of an item.
#[must_use]
pub fn permissions_url(storage: &Storage, item: &RemoteItem) -> String {
    format!("{}/permissions", item_url(storage, item))
}

/// A single permission set of an item.
#[must_use]
pub fn permission_url(storage: &Storage, item: &RemoteItem, id: &PermissionSetId) -> String {
    format!(
        "{}/permissions/{}",
        item_url(storage, item),
        utf8_percent_encode(id.as_str(), SEGMENT)
    )
}

/// Invite endpoint of an item.
#[must_use]
pub fn invite_url(storage: &Storage, item: &RemoteItem) -> String {
    format!("{}/invite", item_url(storage, item))
}
