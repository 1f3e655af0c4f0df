//! Admin Flag Use Cases

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{bounded, store_failure};
use crate::domain::repository::{AdminSetter, UserProvider};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthResult, missing_fields};

/// Reads a user's admin flag
pub struct IsAdminUseCase<P>
where
    P: UserProvider,
{
    users: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> IsAdminUseCase<P>
where
    P: UserProvider,
{
    pub fn new(users: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self { users, config }
    }

    #[tracing::instrument(name = "auth.is_admin", skip_all, fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: UserId) -> AuthResult<bool> {
        if let Some(err) = missing_fields([("user_id", user_id.is_unset())]) {
            return Err(err);
        }

        let is_admin = bounded(self.config.store_timeout, self.users.is_admin(user_id))
            .await
            .map_err(store_failure)?;

        tracing::debug!(is_admin, "checked admin flag");

        Ok(is_admin)
    }
}

/// Sets a user's admin flag; idempotent
pub struct SetAdminUseCase<S>
where
    S: AdminSetter,
{
    setter: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SetAdminUseCase<S>
where
    S: AdminSetter,
{
    pub fn new(setter: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { setter, config }
    }

    #[tracing::instrument(
        name = "auth.set_admin",
        skip_all,
        fields(user_id = %user_id, is_admin = is_admin)
    )]
    pub async fn execute(&self, user_id: UserId, is_admin: bool) -> AuthResult<bool> {
        if let Some(err) = missing_fields([("user_id", user_id.is_unset())]) {
            return Err(err);
        }

        let applied = bounded(
            self.config.store_timeout,
            self.setter.set_admin(user_id, is_admin),
        )
        .await
        .map_err(store_failure)?;

        tracing::info!(is_admin = applied, "admin flag updated");

        Ok(applied)
    }
}
