//! Login Use Case
//!
//! Checks a user's credentials and issues a session token for the calling
//! application.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};
use tokio::sync::OnceCell;

use crate::application::config::AuthConfig;
use crate::application::{blocking, bounded, store_failure};
use crate::domain::repository::{AppProvider, StoreError, UserProvider};
use crate::domain::security::{PasswordHasher, TokenIssuer};
use crate::domain::value_object::{app_id::AppId, email::Email};
use crate::error::{AuthError, AuthResult, missing_fields};

/// Password hashed once per service; unknown e-mails are verified against it
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Lazily built decoy hash, shared by every login of one service
pub type DecoyHash = OnceCell<HashedPassword>;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub app_id: AppId,
}

/// Login use case
pub struct LoginUseCase<P, A>
where
    P: UserProvider,
    A: AppProvider,
{
    users: Arc<P>,
    apps: Arc<A>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    decoy: Arc<DecoyHash>,
    config: Arc<AuthConfig>,
}

impl<P, A> LoginUseCase<P, A>
where
    P: UserProvider,
    A: AppProvider,
{
    pub fn new(
        users: Arc<P>,
        apps: Arc<A>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        decoy: Arc<DecoyHash>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            apps,
            hasher,
            issuer,
            decoy,
            config,
        }
    }

    #[tracing::instrument(
        name = "auth.login",
        skip_all,
        fields(email = %input.email, app_id = %input.app_id)
    )]
    pub async fn execute(&self, input: LoginInput) -> AuthResult<String> {
        if let Some(err) = missing_fields([
            ("email", input.email.is_empty()),
            ("password", input.password.is_empty()),
            ("app_id", input.app_id.is_unset()),
        ]) {
            return Err(err);
        }

        let email = Email::new(input.email).map_err(|_| AuthError::MissingFields(vec!["email"]))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::MissingFields(vec!["password"]))?;

        let timeout = self.config.store_timeout;

        let user = match bounded(timeout, self.users.user_by_email(&email)).await {
            Ok(user) => user,
            Err(StoreError::UserNotFound) => {
                // Same Argon2 work as a wrong password
                self.spend_one_hash(password).await?;
                return Err(store_failure(StoreError::UserNotFound));
            }
            Err(e) => return Err(store_failure(e)),
        };

        let hasher = Arc::clone(&self.hasher);
        let stored_hash = user.password_hash.clone();
        let password_ok = blocking(move || hasher.verify(&stored_hash, &password)).await?;

        if !password_ok {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials.logged());
        }

        let app = bounded(timeout, self.apps.app_by_id(input.app_id))
            .await
            .map_err(store_failure)?;

        let token = self
            .issuer
            .issue(&user, &app, self.config.token_ttl)
            .map_err(|e| AuthError::internal(e).logged())?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(token)
    }

    /// Run exactly one Argon2 computation for a login with no account
    ///
    /// Verifies against the decoy hash; the first such login builds the decoy
    /// instead, which costs the same.
    async fn spend_one_hash(&self, password: ClearTextPassword) -> AuthResult<()> {
        let hasher = Arc::clone(&self.hasher);

        if let Some(decoy) = self.decoy.get() {
            let decoy = decoy.clone();
            blocking(move || hasher.verify(&decoy, &password)).await?;
            return Ok(());
        }

        drop(password);
        let decoy = ClearTextPassword::new(DECOY_PASSWORD.to_string())
            .map_err(|e| AuthError::internal(e).logged())?;
        let decoy = blocking(move || hasher.hash(&decoy))
            .await?
            .map_err(|e| AuthError::internal(e).logged())?;

        // A concurrent first miss may have won; either hash will do
        let _ = self.decoy.set(decoy);

        Ok(())
    }
}
