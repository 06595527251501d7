//! Remote drive permission API.
//!
//! ```text
//! DriveClient ──build──▶ HttpRequest ──HttpTransport──▶ HttpResponse
//!      ▲                                                     │
//!      └──────────── map_response (status → RemoteError) ◀───┘
//! ```

mod client;
mod endpoint;
mod response;
mod wire;

pub use client::DriveClient;
pub use endpoint::{invite_url, permission_url, permissions_url};
pub use response::{map_response, RemoteError, RemoteResult};
pub use wire::ExistingPermission;
