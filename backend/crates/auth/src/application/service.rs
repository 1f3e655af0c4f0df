//! Auth Service
//!
//! Facade owning the shared collaborators. Builds the use case for each call;
//! holds no per-request state, so one instance serves all callers.

use std::sync::Arc;

use crate::application::admin::{IsAdminUseCase, SetAdminUseCase};
use crate::application::config::AuthConfig;
use crate::application::login::{DecoyHash, LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::repository::CredentialStore;
use crate::domain::security::{PasswordHasher, TokenIssuer};
use crate::domain::value_object::{app_id::AppId, user_id::UserId};
use crate::error::AuthResult;

/// Credential service
pub struct AuthService<R>
where
    R: CredentialStore,
{
    store: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    decoy: Arc<DecoyHash>,
    config: Arc<AuthConfig>,
}

// Manual impl: `R` itself need not be `Clone`.
impl<R> Clone for AuthService<R>
where
    R: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
            issuer: Arc::clone(&self.issuer),
            decoy: Arc::clone(&self.decoy),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> AuthService<R>
where
    R: CredentialStore,
{
    pub fn new(
        store: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        config: AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            decoy: Arc::new(DecoyHash::new()),
            config: Arc::new(config),
        }
    }

    /// Register a user; returns the new user's ID
    pub async fn register(&self, email: String, password: String) -> AuthResult<UserId> {
        RegisterUseCase::new(
            Arc::clone(&self.store),
            Arc::clone(&self.store),
            Arc::clone(&self.hasher),
            Arc::clone(&self.config),
        )
        .execute(RegisterInput { email, password })
        .await
    }

    /// Log in to `app_id`; returns a signed session token
    pub async fn login(&self, email: String, password: String, app_id: AppId) -> AuthResult<String> {
        LoginUseCase::new(
            Arc::clone(&self.store),
            Arc::clone(&self.store),
            Arc::clone(&self.hasher),
            Arc::clone(&self.issuer),
            Arc::clone(&self.decoy),
            Arc::clone(&self.config),
        )
        .execute(LoginInput {
            email,
            password,
            app_id,
        })
        .await
    }

    pub async fn logout(&self, token: &str) -> AuthResult<bool> {
        LogoutUseCase::new().execute(token).await
    }

    pub async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
        IsAdminUseCase::new(Arc::clone(&self.store), Arc::clone(&self.config))
            .execute(user_id)
            .await
    }

    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> AuthResult<bool> {
        SetAdminUseCase::new(Arc::clone(&self.store), Arc::clone(&self.config))
            .execute(user_id, is_admin)
            .await
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
