//! Test doubles for the HTTP layer.
//!
//! [`RecordingTransport`] replays a scripted queue of responses and
//! records every request it receives, so reconciliation runs can be
//! asserted on call count, order, URLs and bodies without a network.
//!
//! # Features
//!
//! - FIFO script of responses or transport errors
//! - Full request capture (method, URL, headers, body)
//! - An exhausted script answers with a `network` transport error
//!
//! # Example
//!
//! ```
//! use permsync_runtime::http::{HttpMethod, HttpRequest, HttpTransport};
//! use permsync_runtime::testing::RecordingTransport;
//!
//! let transport = RecordingTransport::new()
//!     .respond(200, r#"{"value":[]}"#)
//!     .respond(204, "");
//!
//! let resp = transport
//!     .send(&HttpRequest::new(HttpMethod::Get, "http://x/permissions"))
//!     .unwrap();
//! assert_eq!(resp.status, 200);
//!
//! assert_eq!(transport.calls(), vec![(HttpMethod::Get, "http://x/permissions".to_string())]);
//! assert_eq!(transport.remaining(), 1);
//! ```

use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;

/// Scripted, request-recording [`HttpTransport`].
#[derive(Debug, Default)]
pub struct RecordingTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scripted outcome.
    #[must_use]
    pub fn push(self, outcome: Result<HttpResponse, TransportError>) -> Self {
        self.script.lock().push_back(outcome);
        self
    }

    /// Appends a response.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    /// Appends a 200 response with a JSON body.
    #[must_use]
    pub fn respond_json(self, body: &Value) -> Self {
        self.respond(200, body.to_string())
    }

    /// Appends a transport failure.
    #[must_use]
    pub fn fail(self, kind: TransportErrorKind, message: impl Into<String>) -> Self {
        self.push(Err(TransportError::new(kind, message)))
    }

    /// All requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// `(method, url)` of every request, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.requests
            .lock()
            .iter()
            .map(|r| (r.method, r.url.clone()))
            .collect()
    }

    /// Requests with the given method.
    #[must_use]
    pub fn requests_with(&self, method: HttpMethod) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    /// The single request received.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one request was received.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn only_request(&self) -> HttpRequest {
        let requests = self.requests.lock();
        match requests.as_slice() {
            [one] => one.clone(),
            other => panic!("expected exactly one request, got {}", other.len()),
        }
    }

    /// Scripted outcomes not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl HttpTransport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request.clone());
        self.script.lock().pop_front().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportErrorKind::Network,
                format!("no scripted response for {} {}", request.method, request.url),
            ))
        })
    }
}

/// Body of a permission listing with one record per `(id, role)` pair.
#[must_use]
pub fn permission_list(records: &[(&str, &str)]) -> Value {
    let value: Vec<Value> = records
        .iter()
        .map(|(id, role)| json!({"id": id, "roles": [role]}))
        .collect();
    json!({ "value": value })
}
