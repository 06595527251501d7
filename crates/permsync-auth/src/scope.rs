//! Scoped token acquisition.
//!
//! A [`TokenScope`] holds one token for the length of one reconciliation.
//! Dropping the scope calls [`TokenProvider::release`], including on early
//! returns through `?`.
//!
//! ```text
//! TokenScope::acquire ──► fetch ──► mutate read ──► mutate write ──► drop
//!        │                                                            │
//!   provider.acquire()                                     provider.release()
//! ```

use crate::{BearerToken, TokenError, TokenProvider};
use permsync_types::Storage;
use tracing::debug;

/// RAII guard over an acquired bearer token.
///
/// # Example
///
/// ```
/// use permsync_auth::{StaticTokenProvider, TokenScope};
/// use permsync_types::Storage;
///
/// let provider = StaticTokenProvider::new("abc");
/// let storage = Storage::new("https://graph.example.com", "d1");
///
/// let scope = TokenScope::acquire(&provider, &storage).unwrap();
/// assert_eq!(scope.token().secret(), "abc");
/// // released here
/// ```
#[derive(Debug)]
pub struct TokenScope<'a> {
    provider: &'a dyn TokenProvider,
    storage: &'a Storage,
    token: BearerToken,
}

impl<'a> TokenScope<'a> {
    /// Acquires a token from `provider` for `storage`.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`TokenError`]; nothing is released in
    /// that case because nothing was acquired.
    pub fn acquire(
        provider: &'a dyn TokenProvider,
        storage: &'a Storage,
    ) -> Result<Self, TokenError> {
        let token = provider.acquire(storage)?;
        debug!(drive = %storage.drive_id(), "Acquired bearer token");
        Ok(Self {
            provider,
            storage,
            token,
        })
    }

    /// The token held by this scope.
    #[must_use]
    pub fn token(&self) -> &BearerToken {
        &self.token
    }
}

impl Drop for TokenScope<'_> {
    fn drop(&mut self) {
        self.provider.release(self.storage, &self.token);
        debug!(drive = %self.storage.drive_id(), "Released bearer token");
    }
}
