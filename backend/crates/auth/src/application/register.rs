//! Register Use Case
//!
//! Creates a new user from an e-mail and password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::{blocking, bounded, store_failure};
use crate::domain::repository::{StoreError, UserProvider, UserSaver};
use crate::domain::security::PasswordHasher;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult, missing_fields};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<S, P>
where
    S: UserSaver,
    P: UserProvider,
{
    saver: Arc<S>,
    provider: Arc<P>,
    hasher: Arc<dyn PasswordHasher>,
    config: Arc<AuthConfig>,
}

impl<S, P> RegisterUseCase<S, P>
where
    S: UserSaver,
    P: UserProvider,
{
    pub fn new(
        saver: Arc<S>,
        provider: Arc<P>,
        hasher: Arc<dyn PasswordHasher>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            saver,
            provider,
            hasher,
            config,
        }
    }

    #[tracing::instrument(name = "auth.register", skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserId> {
        if let Some(err) = missing_fields([
            ("email", input.email.is_empty()),
            ("password", input.password.is_empty()),
        ]) {
            return Err(err);
        }

        let email = Email::new(input.email).map_err(|_| AuthError::MissingFields(vec!["email"]))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::MissingFields(vec!["password"]))?;

        // Hash before anything touches the store
        let hasher = Arc::clone(&self.hasher);
        let password_hash = blocking(move || hasher.hash(&password))
            .await?
            .map_err(|e| AuthError::internal(e).logged())?;

        let timeout = self.config.store_timeout;

        match bounded(timeout, self.provider.user_by_email(&email)).await {
            Ok(_) => return Err(AuthError::AlreadyExists.logged()),
            Err(StoreError::UserNotFound) => {}
            Err(e) => return Err(store_failure(e)),
        }

        let user_id = bounded(timeout, self.saver.save_user(&email, &password_hash))
            .await
            .map_err(store_failure)?;

        tracing::info!(user_id = %user_id, "user registered");

        Ok(user_id)
    }
}
