//! Status classification for drive API responses.
//!
//! | Status | Result |
//! |--------|--------|
//! | 200 | success, body decoded as JSON |
//! | 204 | success, no body |
//! | 401 | [`RemoteError::Unauthorized`] |
//! | 403 | [`RemoteError::Forbidden`] |
//! | 404 | [`RemoteError::NotFound`] |
//! | other | [`RemoteError::UnexpectedStatus`] |

use crate::http::{HttpResponse, TransportError};
use permsync_types::{AccessLevel, ErrorCode, FailureKind};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single drive API call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// 401.
    #[error("unauthorized: token rejected by storage")]
    Unauthorized,

    /// 403.
    #[error("forbidden: token lacks access to the item")]
    Forbidden,

    /// 404.
    #[error("not found")]
    NotFound,

    /// Any status other than 200, 204, 401, 403, 404.
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// A 200 response whose body is not the expected JSON.
    #[error("malformed response body: {message}")]
    MalformedBody { message: String },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Create was asked to invite nobody.
    #[error("refusing to create a {level} permission set with no grantees")]
    EmptyRecipients { level: AccessLevel },
}

impl RemoteError {
    /// Creates a malformed body error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody {
            message: message.into(),
        }
    }

    /// Caller-facing failure category.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Unauthorized => FailureKind::Unauthorized,
            Self::Forbidden => FailureKind::Forbidden,
            Self::NotFound => FailureKind::NotFound,
            Self::UnexpectedStatus { .. }
            | Self::MalformedBody { .. }
            | Self::EmptyRecipients { .. } => FailureKind::GenericError,
            Self::Transport(_) => FailureKind::TransportError,
        }
    }

    /// HTTP status behind this error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::MalformedBody { .. } => Some(200),
            Self::Transport(_) | Self::EmptyRecipients { .. } => None,
        }
    }
}

impl ErrorCode for RemoteError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "REMOTE_UNAUTHORIZED",
            Self::Forbidden => "REMOTE_FORBIDDEN",
            Self::NotFound => "REMOTE_NOT_FOUND",
            Self::UnexpectedStatus { .. } => "REMOTE_UNEXPECTED_STATUS",
            Self::MalformedBody { .. } => "REMOTE_MALFORMED_BODY",
            Self::Transport(_) => "REMOTE_TRANSPORT",
            Self::EmptyRecipients { .. } => "REMOTE_EMPTY_RECIPIENTS",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            Self::UnexpectedStatus { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Result alias for drive API calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Maps a response to its outcome.
///
/// Returns `Some(json)` for 200 and `None` for 204.
///
/// # Errors
///
/// Every other status maps to its [`RemoteError`]. A 200 with a body
/// that is not valid JSON yields [`RemoteError::MalformedBody`].
pub fn map_response(response: &HttpResponse) -> RemoteResult<Option<Value>> {
    match response.status {
        200 => serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| RemoteError::malformed(e.to_string())),
        204 => Ok(None),
        401 => Err(RemoteError::Unauthorized),
        403 => Err(RemoteError::Forbidden),
        404 => Err(RemoteError::NotFound),
        status => Err(RemoteError::UnexpectedStatus {
            status,
            body: truncate_for_error(&response.body, 200).to_string(),
        }),
    }
}

/// Truncates on a char boundary.
fn truncate_for_error(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::TransportErrorKind;
    use permsync_types::assert_error_codes;

    #[test]
    fn ok_decodes_json() {
        let value = map_response(&HttpResponse::new(200, r#"{"value":[]}"#))
            .unwrap()
            .unwrap();
        assert_eq!(value["value"], serde_json::json!([]));
    }

    #[test]
    fn no_content_is_success() {
        assert_eq!(map_response(&HttpResponse::no_content()).unwrap(), None);
    }

    #[test]
    fn ok_with_bad_json_is_generic() {
        let err = map_response(&HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedBody { .. }), "got: {err}");
        assert_eq!(err.kind(), FailureKind::GenericError);

        let err = map_response(&HttpResponse::new(200, "")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::GenericError);
    }

    #[test]
    fn authorization_statuses() {
        let kind = |status| map_response(&HttpResponse::new(status, "")).unwrap_err().kind();
        assert_eq!(kind(401), FailureKind::Unauthorized);
        assert_eq!(kind(403), FailureKind::Forbidden);
        assert_eq!(kind(404), FailureKind::NotFound);
    }

    #[test]
    fn other_statuses_are_generic() {
        for status in [201, 202, 400, 409, 429, 500, 503] {
            let err = map_response(&HttpResponse::new(status, "{}")).unwrap_err();
            assert_eq!(err.kind(), FailureKind::GenericError, "status {status}");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "é".repeat(300);
        let err = map_response(&HttpResponse::new(500, body)).unwrap_err();
        match err {
            RemoteError::UnexpectedStatus { body, .. } => assert!(body.len() <= 200),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn transport_kind() {
        let err = RemoteError::from(TransportError::new(TransportErrorKind::Timeout, "t"));
        assert_eq!(err.kind(), FailureKind::TransportError);
        assert!(err.is_recoverable());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn all_codes_prefixed() {
        let all = [
            RemoteError::Unauthorized,
            RemoteError::Forbidden,
            RemoteError::NotFound,
            RemoteError::UnexpectedStatus {
                status: 500,
                body: String::new(),
            },
            RemoteError::malformed("x"),
            RemoteError::Transport(TransportError::new(TransportErrorKind::Dns, "x")),
            RemoteError::EmptyRecipients {
                level: AccessLevel::Read,
            },
        ];
        assert_error_codes(&all, "REMOTE_");
    }

    #[test]
    fn server_errors_are_recoverable() {
        let err = RemoteError::UnexpectedStatus {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_recoverable());
        assert!(!RemoteError::Unauthorized.is_recoverable());
    }
}
