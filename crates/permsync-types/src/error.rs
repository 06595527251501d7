//! Unified error interface for permsync.
//!
//! Every error type in the workspace implements [`ErrorCode`] so callers
//! can branch on a stable machine-readable code and on recoverability
//! without matching crate-specific enums.
//!
//! Remote failures additionally collapse into a [`FailureKind`], the
//! five-way taxonomy callers use to decide between retrying, alerting a
//! user, or ignoring.
//!
//! # Example
//!
//! ```
//! use permsync_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Gone,
//!     Timeout,
//! }
//!
//! impl ErrorCode for FetchError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Gone => "FETCH_GONE",
//!             Self::Timeout => "FETCH_TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(FetchError::Timeout.code(), "FETCH_TIMEOUT");
//! assert!(!FetchError::Gone.is_recoverable());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"REMOTE_FORBIDDEN"`
/// - **Prefixed by domain**: `AUTH_`, `CONFIG_`, `REMOTE_`, `RECONCILE_`, ...
/// - **Stable**: codes are part of the public contract
///
/// # Recoverability
///
/// An error is recoverable when retrying (possibly after a token refresh
/// by an external collaborator) may succeed. Invalid input and missing
/// remote items are not recoverable.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether a retry may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Classification of a failed remote interaction.
///
/// | Kind | Source |
/// |------|--------|
/// | `Unauthorized` | HTTP 401 |
/// | `Forbidden` | HTTP 403 |
/// | `NotFound` | HTTP 404 |
/// | `GenericError` | any other status, or an undecodable body |
/// | `TransportError` | no HTTP response at all |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The bearer token was rejected.
    Unauthorized,
    /// The token is valid but lacks rights on the item.
    Forbidden,
    /// The drive or item does not exist.
    NotFound,
    /// Any other non-success outcome.
    GenericError,
    /// Network or connection failure before a response arrived.
    TransportError,
}

impl FailureKind {
    /// Returns the snake_case name used in reports and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::GenericError => "generic_error",
            Self::TransportError => "transport_error",
        }
    }

    /// Returns `true` for 401/403, which need a token refresh or elevated
    /// rights rather than a plain retry.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates that an error code follows the workspace conventions.
///
/// # Panics
///
/// Panics with a descriptive message if the code is empty, lacks the
/// prefix, or is not UPPER_SNAKE_CASE. Intended for tests.
///
/// # Example
///
/// ```
/// use permsync_types::{assert_error_code, ErrorCode};
///
/// struct Boom;
///
/// impl ErrorCode for Boom {
///     fn code(&self) -> &'static str { "TEST_BOOM" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Boom, "TEST_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every error in a slice. See [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
