//! Logout Use Case
//!
//! Tokens are stateless and there is nothing to revoke yet, so logout
//! always reports `false`. The transport still requires a token.

use crate::error::AuthResult;

/// Logout use case
#[derive(Debug, Default, Clone, Copy)]
pub struct LogoutUseCase;

impl LogoutUseCase {
    pub fn new() -> Self {
        Self
    }

    /// The token is never parsed.
    #[tracing::instrument(name = "auth.logout", skip_all)]
    pub async fn execute(&self, _token: &str) -> AuthResult<bool> {
        tracing::debug!("logout requested; tokens are not revoked");

        Ok(false)
    }
}
