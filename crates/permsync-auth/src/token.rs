//! Bearer token value type.

use std::fmt;

/// An OAuth bearer token for the drive API.
///
/// `Debug` is redacted so tokens never leak through `tracing` fields or
/// panic messages. There is no `Display` impl; use
/// [`authorization_header`](Self::authorization_header) to put it on the
/// wire.
///
/// # Example
///
/// ```
/// use permsync_auth::BearerToken;
///
/// let token = BearerToken::new("eyJ0eXAi");
/// assert_eq!(token.authorization_header(), "Bearer eyJ0eXAi");
/// assert!(!format!("{token:?}").contains("eyJ0eXAi"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}
