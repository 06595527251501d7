//! Resolved storage target.

use crate::DriveId;
use serde::{Deserialize, Serialize};

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1.0";

/// A validated drive endpoint: where requests go and which drive they
/// address.
///
/// Built by the runtime from configuration; the token provider receives
/// it so it can scope tokens per storage.
///
/// # Example
///
/// ```
/// use permsync_types::Storage;
///
/// let storage = Storage::new("https://graph.example.com/", "b!drive");
/// assert_eq!(storage.base_url(), "https://graph.example.com/v1.0");
/// assert_eq!(storage.drive_id().as_str(), "b!drive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    origin: String,
    api_version: String,
    drive_id: DriveId,
}

impl Storage {
    /// Creates a storage target with the default API version.
    #[must_use]
    pub fn new(origin: impl Into<String>, drive_id: impl Into<DriveId>) -> Self {
        Self {
            origin: origin.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            drive_id: drive_id.into(),
        }
    }

    /// Overrides the API version path segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Scheme + host (+ optional port), as configured.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// API version segment, e.g. `v1.0`.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Drive addressed by every request.
    #[must_use]
    pub fn drive_id(&self) -> &DriveId {
        &self.drive_id
    }

    /// `{origin}/{api_version}` with no trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trims_slashes() {
        let storage = Storage::new("http://localhost:8080//", "d").with_api_version("/beta/");
        assert_eq!(storage.base_url(), "http://localhost:8080/beta");
    }

    #[test]
    fn default_api_version() {
        let storage = Storage::new("https://graph.microsoft.com", "d");
        assert_eq!(storage.api_version(), DEFAULT_API_VERSION);
        assert_eq!(storage.origin(), "https://graph.microsoft.com");
    }
}
