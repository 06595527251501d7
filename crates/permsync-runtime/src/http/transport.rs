//! Transport abstraction.
//!
//! The drive client builds [`HttpRequest`] values and hands them to an
//! [`HttpTransport`]. Production uses [`UreqTransport`](super::UreqTransport);
//! tests use [`RecordingTransport`](crate::testing::RecordingTransport).
//!
//! A transport only fails when no HTTP response was obtained. Every
//! status code, including 4xx/5xx, comes back as an [`HttpResponse`] and
//! is classified by the caller.

use permsync_types::ErrorCode;
use std::fmt;
use thiserror::Error;

/// HTTP methods used against the drive API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read the permission list.
    Get,
    /// Invite grantees.
    Post,
    /// Remove a permission set.
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, in send order.
    pub headers: Vec<(String, String)>,
    /// JSON body, for POST.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first header value with a case-insensitive name match.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Body as UTF-8 text (empty for 204).
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 204 response with an empty body.
    #[must_use]
    pub fn no_content() -> Self {
        Self::new(204, "")
    }
}

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The global request timeout elapsed.
    Timeout,
    /// Host name resolution failed.
    Dns,
    /// Nothing listening on the target port.
    ConnectionRefused,
    /// Peer reset the connection.
    ConnectionReset,
    /// TLS handshake or certificate failure.
    Tls,
    /// Response body could not be read.
    Body,
    /// Anything else.
    Network,
}

impl TransportErrorKind {
    /// snake_case name for logs and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Dns => "dns",
            Self::ConnectionRefused => "connection_refused",
            Self::ConnectionReset => "connection_reset",
            Self::Tls => "tls",
            Self::Body => "body",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// No HTTP response could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error ({kind}): {message}")]
pub struct TransportError {
    /// Failure classification.
    pub kind: TransportErrorKind,
    /// Underlying error text.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl ErrorCode for TransportError {
    fn code(&self) -> &'static str {
        match self.kind {
            TransportErrorKind::Timeout => "TRANSPORT_TIMEOUT",
            TransportErrorKind::Dns => "TRANSPORT_DNS",
            TransportErrorKind::ConnectionRefused => "TRANSPORT_CONNECTION_REFUSED",
            TransportErrorKind::ConnectionReset => "TRANSPORT_CONNECTION_RESET",
            TransportErrorKind::Tls => "TRANSPORT_TLS",
            TransportErrorKind::Body => "TRANSPORT_BODY",
            TransportErrorKind::Network => "TRANSPORT_NETWORK",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Timeout
                | TransportErrorKind::ConnectionReset
                | TransportErrorKind::Network
        )
    }
}

/// Blocking request/response transport.
///
/// Timeouts and connection handling belong to the implementation; the
/// reconciler never retries.
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Sends one request and waits for its response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no response was received.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use permsync_types::assert_error_codes;

    #[test]
    fn request_builder() {
        let req = HttpRequest::new(HttpMethod::Post, "http://x/invite")
            .header("Authorization", "Bearer t")
            .header("Content-Type", "application/json")
            .body("{}");

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header_value("authorization"), Some("Bearer t"));
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.header_value("accept"), None);
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn transport_error_codes() {
        let all = [
            TransportErrorKind::Timeout,
            TransportErrorKind::Dns,
            TransportErrorKind::ConnectionRefused,
            TransportErrorKind::ConnectionReset,
            TransportErrorKind::Tls,
            TransportErrorKind::Body,
            TransportErrorKind::Network,
        ]
        .map(|kind| TransportError::new(kind, "x"));
        assert_error_codes(&all, "TRANSPORT_");
    }

    #[test]
    fn transient_failures_are_recoverable() {
        assert!(TransportError::new(TransportErrorKind::Timeout, "").is_recoverable());
        assert!(TransportError::new(TransportErrorKind::ConnectionReset, "").is_recoverable());
        assert!(!TransportError::new(TransportErrorKind::Dns, "").is_recoverable());
        assert!(!TransportError::new(TransportErrorKind::Tls, "").is_recoverable());
    }

    #[test]
    fn display_includes_kind() {
        let err = TransportError::new(TransportErrorKind::Dns, "no such host");
        assert_eq!(err.to_string(), "transport error (dns): no such host");
    }
}
