//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use permsync_types::{Storage, DEFAULT_API_VERSION};
use serde::{Deserialize, Serialize};

/// Default drive API origin.
pub const DEFAULT_ORIGIN: &str = "https://graph.microsoft.com";

/// Default environment variable holding the bearer token.
pub const DEFAULT_TOKEN_ENV: &str = "PERMSYNC_TOKEN";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure, after merging all layers.
///
/// # Example
///
/// ```
/// use permsync_runtime::config::PermsyncConfig;
///
/// let config = PermsyncConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.http.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PermsyncConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Remote drive endpoint.
    pub storage: StorageConfig,

    /// HTTP transport settings.
    pub http: HttpConfig,

    /// Token source.
    pub auth: AuthConfig,

    /// Reconciliation behavior.
    pub reconcile: ReconcileConfig,

    /// Log output.
    pub logging: LoggingConfig,
}

impl PermsyncConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Deserializes an already parsed TOML table.
    ///
    /// # Errors
    ///
    /// Returns error if a key has the wrong type or an unknown enum value.
    pub fn from_table(table: toml::Table) -> Result<Self, toml::de::Error> {
        toml::Value::Table(table).try_into()
    }
}

/// Remote drive endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Scheme + host of the drive API.
    pub origin: String,

    /// API version path segment.
    pub api_version: String,

    /// Drive holding the items to reconcile. Required.
    pub drive_id: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.into(),
            api_version: DEFAULT_API_VERSION.into(),
            drive_id: String::new(),
        }
    }
}

impl StorageConfig {
    /// Validates and converts into a [`Storage`] target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the drive id is empty or the
    /// origin is not an `http://` / `https://` URL.
    pub fn to_storage(&self) -> Result<Storage, ConfigError> {
        if self.drive_id.trim().is_empty() {
            return Err(ConfigError::invalid("storage.drive_id", "must not be empty"));
        }
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            return Err(ConfigError::invalid(
                "storage.origin",
                format!("must start with http:// or https://, got '{}'", self.origin),
            ));
        }
        if self.api_version.trim_matches('/').is_empty() {
            return Err(ConfigError::invalid("storage.api_version", "must not be empty"));
        }

        Ok(Storage::new(self.origin.as_str(), self.drive_id.trim())
            .with_api_version(self.api_version.as_str()))
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// Global per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Token source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Environment variable the bearer token is read from.
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.into(),
        }
    }
}

/// What to do when the item itself is missing (404 on fetch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    /// Abort the reconciliation with a not-found failure.
    #[default]
    Fail,
    /// Treat the item as having no permissions and continue.
    TreatAsEmpty,
}

/// Reconciliation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Handling of a 404 on the initial permission fetch.
    pub missing_item: MissingItemPolicy,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when neither `--debug` nor `--verbose`
    /// nor `RUST_LOG` is given.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PermsyncConfig::default();
        assert!(!config.debug);
        assert_eq!(config.storage.origin, DEFAULT_ORIGIN);
        assert_eq!(config.storage.api_version, "v1.0");
        assert!(config.storage.drive_id.is_empty());
        assert_eq!(config.auth.token_env, "PERMSYNC_TOKEN");
        assert_eq!(config.reconcile.missing_item, MissingItemPolicy::Fail);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = PermsyncConfig::default();
        config.storage.drive_id = "b!drive".into();
        config.reconcile.missing_item = MissingItemPolicy::TreatAsEmpty;

        let toml = config.to_toml().expect("serialize");
        let parsed = PermsyncConfig::from_toml(&toml).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = PermsyncConfig::from_toml(
            r#"
[storage]
drive_id = "b!abc"

[reconcile]
missing_item = "treat_as_empty"
"#,
        )
        .expect("parse");

        assert_eq!(config.storage.drive_id, "b!abc");
        assert_eq!(config.storage.origin, DEFAULT_ORIGIN);
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.reconcile.missing_item, MissingItemPolicy::TreatAsEmpty);
    }

    #[test]
    fn from_table_fills_missing_keys() {
        let mut table = toml::Table::new();
        table.insert("debug".into(), toml::Value::Boolean(true));

        let config = PermsyncConfig::from_table(table).expect("deserialize");
        assert!(config.debug);
        assert_eq!(config.http, HttpConfig::default());

        let mut bad = toml::Table::new();
        bad.insert("debug".into(), toml::Value::String("sometimes".into()));
        assert!(PermsyncConfig::from_table(bad).is_err());
    }

    #[test]
    fn to_storage_validates() {
        let mut storage = StorageConfig::default();
        let err = storage.to_storage().expect_err("empty drive id");
        assert!(err.to_string().contains("storage.drive_id"), "got: {err}");

        storage.drive_id = "d1".into();
        storage.origin = "ftp://example.com".into();
        let err = storage.to_storage().expect_err("bad scheme");
        assert!(err.to_string().contains("storage.origin"), "got: {err}");

        storage.origin = "https://graph.example.com".into();
        let resolved = storage.to_storage().expect("valid");
        assert_eq!(resolved.drive_id().as_str(), "d1");
        assert_eq!(resolved.base_url(), "https://graph.example.com/v1.0");
    }
}
