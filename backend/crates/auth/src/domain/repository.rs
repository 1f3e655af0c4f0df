//! Repository Traits
//!
//! The credential store contract. Each capability is its own trait so a
//! backing store or a test double can implement only what a use case needs.
//! Implementations live in the infrastructure layer.

use std::time::Duration;

use thiserror::Error;

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::{app_id::AppId, email::Email, user_id::UserId};
use platform::password::HashedPassword;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation on the user's e-mail
    #[error("user already exists")]
    UserAlreadyExists,

    /// No user row matched
    #[error("user not found")]
    UserNotFound,

    /// No application row matched
    #[error("app not found")]
    AppNotFound,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to the domain
    #[error("corrupted record: {0}")]
    Corrupted(String),

    /// The call did not finish within the configured deadline
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Persists new users
#[trait_variant::make(UserSaver: Send)]
pub trait LocalUserSaver {
    /// Insert a user and return its store-assigned ID.
    ///
    /// Fails with [`StoreError::UserAlreadyExists`] when the e-mail is taken.
    /// Two concurrent inserts of the same e-mail must not both succeed.
    async fn save_user(&self, email: &Email, password_hash: &HashedPassword) -> StoreResult<UserId>;
}

/// Reads users
#[trait_variant::make(UserProvider: Send)]
pub trait LocalUserProvider {
    /// Find user by e-mail
    async fn user_by_email(&self, email: &Email) -> StoreResult<User>;

    /// Read the admin flag
    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool>;
}

/// Reads applications
#[trait_variant::make(AppProvider: Send)]
pub trait LocalAppProvider {
    /// Find application by ID
    async fn app_by_id(&self, app_id: AppId) -> StoreResult<App>;
}

/// Updates the admin flag
#[trait_variant::make(AdminSetter: Send)]
pub trait LocalAdminSetter {
    /// Set the admin flag and return the stored value
    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> StoreResult<bool>;
}

/// A store offering every capability the auth service uses
pub trait CredentialStore:
    UserSaver + UserProvider + AppProvider + AdminSetter + Send + Sync + 'static
{
}

impl<T> CredentialStore for T where
    T: UserSaver + UserProvider + AppProvider + AdminSetter + Send + Sync + 'static
{
}
