//! Invocation-level failures.

use crate::remote::RemoteError;
use permsync_auth::TokenError;
use permsync_types::{ErrorCode, FailureKind};
use thiserror::Error;

/// Failure that aborts a reconciliation before any mutation.
///
/// Per-level mutation failures are not errors; they are reported in
/// [`ReconciliationReport`](super::ReconciliationReport).
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No bearer token could be acquired; nothing was sent.
    #[error("token acquisition failed: {0}")]
    Token(#[from] TokenError),

    /// Reading the current permissions failed; nothing was mutated.
    #[error("fetching permissions failed: {0}")]
    Fetch(#[source] RemoteError),
}

impl ReconcileError {
    /// Failure category of a remote error; `None` for token failures.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Token(_) => None,
            Self::Fetch(e) => Some(e.kind()),
        }
    }
}

impl ErrorCode for ReconcileError {
    fn code(&self) -> &'static str {
        match self {
            Self::Token(e) => e.code(),
            Self::Fetch(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Token(e) => e.is_recoverable(),
            Self::Fetch(e) => e.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_code_and_kind() {
        let err = ReconcileError::Fetch(RemoteError::Unauthorized);
        assert_eq!(err.code(), "REMOTE_UNAUTHORIZED");
        assert_eq!(err.failure_kind(), Some(FailureKind::Unauthorized));
        assert!(err.to_string().contains("unauthorized"), "got: {err}");

        let err = ReconcileError::from(TokenError::missing("PERMSYNC_TOKEN"));
        assert_eq!(err.code(), "AUTH_TOKEN_MISSING");
        assert_eq!(err.failure_kind(), None);
        assert!(!err.is_recoverable());
    }
}
