//! Opaque identifier types.
//!
//! The remote drive API hands out opaque string identifiers for drives,
//! items, permission sets and users. Each gets its own newtype so they
//! cannot be swapped by accident at call sites such as
//! `delete(permission_set_id, item)`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// A file or folder in remote storage.
    ///
    /// Referenced by the reconciler, never owned or created by it.
    ///
    /// ```
    /// use permsync_types::RemoteItem;
    ///
    /// let item = RemoteItem::new("01ABCDEF");
    /// assert_eq!(item.as_str(), "01ABCDEF");
    /// ```
    RemoteItem
}

string_id! {
    /// A drive within the storage backend.
    DriveId
}

string_id! {
    /// The remote identifier of one permission set (one role + grantees).
    PermissionSetId
}

string_id! {
    /// A remote user (directory object) identifier.
    GranteeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        assert_eq!(RemoteItem::new("abc").to_string(), "abc");
        assert_eq!(PermissionSetId::from("p1").to_string(), "p1");
    }

    #[test]
    fn serde_transparent() {
        let id = GranteeId::new("u1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"u1\"");
        let parsed: GranteeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }

    #[test]
    fn conversions() {
        let a: DriveId = "d".into();
        let b: DriveId = String::from("d").into();
        assert_eq!(a, b);
        assert_eq!(a.as_ref(), "d");
    }
}
