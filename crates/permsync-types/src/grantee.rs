//! Grantee sets.

use crate::GranteeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of remote users granted one access level.
///
/// Ordering is irrelevant to the remote API; a `BTreeSet` is used so that
/// request bodies built from the set are deterministic. An empty set is a
/// meaningful value: it means "revoke everyone at this level".
///
/// # Example
///
/// ```
/// use permsync_types::GranteeSet;
///
/// let set: GranteeSet = ["u2", "u1", "u2"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("u1"));
/// assert!(GranteeSet::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GranteeSet(BTreeSet<GranteeId>);

impl GranteeSet {
    /// Creates an empty set ("revoke all").
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grantee. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<GranteeId>) -> bool {
        self.0.insert(id.into())
    }

    /// Returns `true` if the grantee is in the set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|g| g.as_str() == id)
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of grantees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates grantees in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &GranteeId> {
        self.0.iter()
    }
}

impl<T: Into<GranteeId>> FromIterator<T> for GranteeSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a GranteeSet {
    type Item = &'a GranteeId;
    type IntoIter = std::collections::btree_set::Iter<'a, GranteeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_not_order() {
        let a: GranteeSet = ["u1", "u2"].into_iter().collect();
        let b: GranteeSet = ["u2", "u1"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn insert_dedupes() {
        let mut set = GranteeSet::new();
        assert!(set.insert("u1"));
        assert!(!set.insert("u1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iter_is_sorted() {
        let set: GranteeSet = ["u3", "u1", "u2"].into_iter().collect();
        let ids: Vec<&str> = set.iter().map(GranteeId::as_str).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn deserializes_from_json_array() {
        let set: GranteeSet = serde_json::from_str(r#"["b", "a", "b"]"#).expect("deserialize");
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
    }
}
