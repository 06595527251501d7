//! HTTP transport layer.

mod transport;
mod ureq_transport;

pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
};
pub use ureq_transport::UreqTransport;
