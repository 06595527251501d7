//! Failures while assembling a [`PermsyncConfig`](super::PermsyncConfig).

use permsync_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Raised by [`ConfigLoader::load`](super::ConfigLoader::load) and
/// [`StorageConfig::to_storage`](super::StorageConfig::to_storage).
/// Every variant aborts before any HTTP call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid permsync TOML: {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A `PERMSYNC_*` variable is set but unusable.
    #[error("${name}: {message}")]
    InvalidEnvVar { name: String, message: String },

    /// `field` is the dotted TOML path, e.g. `storage.drive_id`.
    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_env_var(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::Invalid { .. } => "CONFIG_INVALID",
        }
    }

    /// Fixing configuration needs an operator.
    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permsync_types::assert_error_codes;

    #[test]
    fn messages_carry_their_subject() {
        let env = ConfigError::invalid_env_var("PERMSYNC_TIMEOUT_SECS", "expected integer seconds");
        assert_eq!(env.to_string(), "$PERMSYNC_TIMEOUT_SECS: expected integer seconds");

        let field = ConfigError::invalid("storage.drive_id", "must not be empty");
        assert_eq!(field.to_string(), "storage.drive_id: must not be empty");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let read = ConfigError::read_file("/etc/permsync.toml", io);
        assert!(read.to_string().starts_with("cannot read /etc/permsync.toml"));
    }

    #[test]
    fn codes_are_stable_and_terminal() {
        let errors = [
            ConfigError::invalid_env_var("PERMSYNC_DEBUG", "expected bool"),
            ConfigError::invalid("storage.origin", "expected http(s) URL"),
        ];
        assert_error_codes(&errors, "CONFIG_");
        assert_eq!(errors[1].code(), "CONFIG_INVALID");
        assert!(errors.iter().all(|e| !e.is_recoverable()));
    }
}
