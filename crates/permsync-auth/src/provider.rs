//! Token provider trait and simple implementations.
//!
//! # Architecture
//!
//! ```text
//! TokenProvider trait (THIS MODULE)
//!     ├── StaticTokenProvider   fixed token (tests, embedding)
//!     ├── EnvTokenProvider      token read from an env var at acquire time
//!     └── (external)            OAuth client-credentials flow, vaults, ...
//! ```
//!
//! Token acquisition is an external collaborator's concern; the runtime
//! only needs a token for the duration of one reconciliation and calls
//! [`TokenProvider::release`] afterwards through [`TokenScope`](crate::TokenScope).

use crate::{BearerToken, TokenError};
use permsync_types::Storage;
use std::fmt;

/// Yields bearer tokens for a storage target.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one provider may serve
/// reconciliations running on several worker threads.
///
/// # Example
///
/// ```
/// use permsync_auth::{BearerToken, TokenError, TokenProvider};
/// use permsync_types::Storage;
///
/// #[derive(Debug)]
/// struct PerDrive;
///
/// impl TokenProvider for PerDrive {
///     fn acquire(&self, storage: &Storage) -> Result<BearerToken, TokenError> {
///         Ok(BearerToken::new(format!("token-for-{}", storage.drive_id())))
///     }
/// }
///
/// let storage = Storage::new("https://graph.example.com", "d1");
/// let token = PerDrive.acquire(&storage).unwrap();
/// assert_eq!(token.secret(), "token-for-d1");
/// ```
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Obtains a token valid for requests against `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if no usable token can be produced.
    fn acquire(&self, storage: &Storage) -> Result<BearerToken, TokenError>;

    /// Invalidates or returns a token obtained from [`acquire`](Self::acquire).
    ///
    /// Called exactly once per acquired token when its scope ends.
    /// The default does nothing.
    fn release(&self, storage: &Storage, token: &BearerToken) {
        let _ = (storage, token);
    }
}

/// Provider returning the same token for every storage.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: BearerToken,
}

impl StaticTokenProvider {
    /// Creates a provider that always yields `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(token),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn acquire(&self, _storage: &Storage) -> Result<BearerToken, TokenError> {
        if self.token.secret().trim().is_empty() {
            return Err(TokenError::empty("static token"));
        }
        Ok(self.token.clone())
    }
}

/// Provider reading the token from an environment variable.
///
/// The variable is read on every [`acquire`](TokenProvider::acquire), so a
/// token rotated by an outer process is picked up by the next
/// reconciliation.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    /// Creates a provider reading `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// The environment variable name.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl TokenProvider for EnvTokenProvider {
    fn acquire(&self, _storage: &Storage) -> Result<BearerToken, TokenError> {
        let value = std::env::var(&self.var).map_err(|_| TokenError::missing(&self.var))?;
        if value.trim().is_empty() {
            return Err(TokenError::empty(&self.var));
        }
        Ok(BearerToken::new(value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        Storage::new("https://graph.example.com", "drive-1")
    }

    #[test]
    fn static_provider_yields_token() {
        let provider = StaticTokenProvider::new("abc");
        let token = provider.acquire(&storage()).expect("token");
        assert_eq!(token.secret(), "abc");
    }

    #[test]
    fn static_provider_rejects_blank_token() {
        let provider = StaticTokenProvider::new("   ");
        let err = provider.acquire(&storage()).expect_err("blank token");
        assert_eq!(err, TokenError::empty("static token"));
    }

    #[test]
    fn env_provider_missing_var() {
        let provider = EnvTokenProvider::new("PERMSYNC_TEST_TOKEN_THAT_IS_NEVER_SET");
        let err = provider.acquire(&storage()).expect_err("missing var");
        assert_eq!(
            err,
            TokenError::missing("PERMSYNC_TEST_TOKEN_THAT_IS_NEVER_SET")
        );
        assert_eq!(provider.var(), "PERMSYNC_TEST_TOKEN_THAT_IS_NEVER_SET");
    }
}
