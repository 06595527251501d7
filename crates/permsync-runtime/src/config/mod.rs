//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────────┐
//! │  1. CLI flags (ConfigResolver)               │  Invocation override
//! ├──────────────────────────────────────────────┤
//! │  2. Environment Variables (PERMSYNC_*)       │  Runtime override
//! ├──────────────────────────────────────────────┤
//! │  3. Project Config (.permsync/config.toml)   │  Project-specific
//! ├──────────────────────────────────────────────┤
//! │  4. Global Config (~/.permsync/config.toml)  │  User defaults
//! ├──────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)            │  Fallback
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `PERMSYNC_DEBUG` | `debug` | bool |
//! | `PERMSYNC_ORIGIN` | `storage.origin` | String |
//! | `PERMSYNC_DRIVE_ID` | `storage.drive_id` | String |
//! | `PERMSYNC_API_VERSION` | `storage.api_version` | String |
//! | `PERMSYNC_TIMEOUT_SECS` | `http.timeout_secs` | u64 |
//! | `PERMSYNC_TOKEN_ENV` | `auth.token_env` | String |
//! | `PERMSYNC_LOG_LEVEL` | `logging.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [storage]
//! origin = "https://graph.microsoft.com"
//! api_version = "v1.0"
//! drive_id = "b!abc"
//!
//! [http]
//! timeout_secs = 30
//!
//! [auth]
//! token_env = "PERMSYNC_TOKEN"
//!
//! [reconcile]
//! missing_item = "fail"   # or "treat_as_empty"
//!
//! [logging]
//! level = "warn"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{
    AuthConfig, HttpConfig, LoggingConfig, MissingItemPolicy, PermsyncConfig, ReconcileConfig,
    StorageConfig, DEFAULT_ORIGIN, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_ENV,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".permsync")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".permsync";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
