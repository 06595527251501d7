//! Blocking transport backed by `ureq`.

use super::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
};
use std::time::Duration;

/// [`HttpTransport`] over a shared `ureq::Agent`.
///
/// Non-2xx statuses are returned as responses, never as errors.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    /// Creates a transport with a global per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            timeout,
        }
    }

    /// Creates a transport with a timeout in whole seconds.
    #[must_use]
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), &request.headers)
                .send(request.body.as_deref().unwrap_or_default().as_bytes()),
        };

        let mut resp = match result {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(status)) => return Ok(HttpResponse::new(status, "")),
            Err(e) => return Err(classify_ureq_error(&e)),
        };

        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(TransportErrorKind::Body, e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(
    mut req: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        req = req.header(name.as_str(), value.as_str());
    }
    req
}

/// Classifies a `ureq` failure.
pub(crate) fn classify_ureq_error(error: &ureq::Error) -> TransportError {
    classify_error_chain(error)
}

/// Classifies any error by walking its source chain for an I/O error,
/// then falling back to message heuristics.
pub(crate) fn classify_error_chain(error: &(dyn std::error::Error + 'static)) -> TransportError {
    let msg = error.to_string();

    let io_err = {
        let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
        let mut found = None;
        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<std::io::Error>() {
                found = Some(io);
                break;
            }
            source = err.source();
        }
        found
    };

    if let Some(io) = io_err {
        let kind = match io.kind() {
            std::io::ErrorKind::TimedOut => Some(TransportErrorKind::Timeout),
            std::io::ErrorKind::ConnectionRefused => Some(TransportErrorKind::ConnectionRefused),
            std::io::ErrorKind::ConnectionReset => Some(TransportErrorKind::ConnectionReset),
            _ => None,
        };
        if let Some(kind) = kind {
            return TransportError::new(kind, msg);
        }
    }

    let lower = msg.to_lowercase();
    let kind = if lower.contains("timeout") || lower.contains("timed out") {
        TransportErrorKind::Timeout
    } else if lower.contains("dns")
        || lower.contains("resolve")
        || lower.contains("name resolution")
        || lower.contains("host not found")
    {
        TransportErrorKind::Dns
    } else if lower.contains("connection refused") {
        TransportErrorKind::ConnectionRefused
    } else if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        TransportErrorKind::Tls
    } else {
        TransportErrorKind::Network
    };
    TransportError::new(kind, msg)
}
