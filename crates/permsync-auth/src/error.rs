//! Token acquisition errors.

use permsync_types::ErrorCode;
use thiserror::Error;

/// Failure to obtain a bearer token.
///
/// Any of these aborts a reconciliation before the first HTTP request.
///
/// # Example
///
/// ```
/// use permsync_auth::TokenError;
/// use permsync_types::ErrorCode;
///
/// let err = TokenError::missing("PERMSYNC_TOKEN");
/// assert_eq!(err.code(), "AUTH_TOKEN_MISSING");
/// assert!(err.to_string().contains("PERMSYNC_TOKEN"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token is available from the named source.
    #[error("no bearer token available from '{source_name}'")]
    Missing {
        /// Where the provider looked (env var name, secret key, ...).
        source_name: String,
    },

    /// A token was found but is empty or whitespace.
    #[error("bearer token from '{source_name}' is empty")]
    Empty {
        /// Where the provider looked.
        source_name: String,
    },

    /// The provider itself failed (e.g. an identity endpoint was down).
    #[error("token provider failed: {0}")]
    Provider(String),
}

impl TokenError {
    /// Creates a missing-token error.
    pub fn missing(source_name: impl Into<String>) -> Self {
        Self::Missing {
            source_name: source_name.into(),
        }
    }

    /// Creates an empty-token error.
    pub fn empty(source_name: impl Into<String>) -> Self {
        Self::Empty {
            source_name: source_name.into(),
        }
    }
}

impl ErrorCode for TokenError {
    fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "AUTH_TOKEN_MISSING",
            Self::Empty { .. } => "AUTH_TOKEN_EMPTY",
            Self::Provider(_) => "AUTH_PROVIDER_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}
