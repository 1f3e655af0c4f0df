//! Application Secret Value Object
//!
//! HS256 signing key of an application. Never printed.

use std::fmt;

/// Application signing secret
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(Vec<u8>);

impl AppSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Key bytes, for signing and verifying only
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AppSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppSecret").field(&"[REDACTED]").finish()
    }
}
