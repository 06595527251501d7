//! Access levels managed on remote items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two roles reconciled on a remote item.
///
/// The derived `Ord` places `Read` before `Write`; reconciliation processes
/// levels in this order so that logs and recorded request sequences are
/// reproducible.
///
/// # Example
///
/// ```
/// use permsync_types::AccessLevel;
///
/// let level: AccessLevel = "write".parse().unwrap();
/// assert_eq!(level, AccessLevel::Write);
/// assert_eq!(level.as_role(), "write");
/// assert!(AccessLevel::Read < AccessLevel::Write);
/// assert!("owner".parse::<AccessLevel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// View-only access.
    Read,
    /// Edit access.
    Write,
}

impl AccessLevel {
    /// All recognized levels in processing order.
    pub const ALL: [AccessLevel; 2] = [AccessLevel::Read, AccessLevel::Write];

    /// Returns the role string used on the wire (`"read"` / `"write"`).
    #[must_use]
    pub fn as_role(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_role())
    }
}

/// An access level key other than `read` or `write`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown access level '{0}' (expected 'read' or 'write')")]
pub struct UnknownAccessLevel(pub String);

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            other => Err(UnknownAccessLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!("read".parse::<AccessLevel>(), Ok(AccessLevel::Read));
        assert_eq!("write".parse::<AccessLevel>(), Ok(AccessLevel::Write));
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "Read".parse::<AccessLevel>().expect_err("should reject");
        assert_eq!(err, UnknownAccessLevel("Read".into()));
        assert!(err.to_string().contains("'Read'"));
    }

    #[test]
    fn role_strings() {
        assert_eq!(AccessLevel::Read.as_role(), "read");
        assert_eq!(AccessLevel::Write.as_role(), "write");
        assert_eq!(AccessLevel::Write.to_string(), "write");
    }

    #[test]
    fn read_sorts_before_write() {
        let mut levels = vec![AccessLevel::Write, AccessLevel::Read];
        levels.sort();
        assert_eq!(levels, AccessLevel::ALL.to_vec());
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&AccessLevel::Read).expect("serialize");
        assert_eq!(json, "\"read\"");
        let parsed: AccessLevel = serde_json::from_str("\"write\"").expect("deserialize");
        assert_eq!(parsed, AccessLevel::Write);
    }
}
