//! Application Layer
//!
//! Use cases and the service facade.

pub mod admin;
pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod service;

use std::future::Future;
use std::time::Duration;

use crate::domain::repository::{StoreError, StoreResult};
use crate::error::{AuthError, AuthResult};

// Re-exports
pub use admin::{IsAdminUseCase, SetAdminUseCase};
pub use config::AuthConfig;
pub use login::{DecoyHash, LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use service::AuthService;

/// Run a store call under a deadline
///
/// Expiry drops the call and reports [`StoreError::Timeout`].
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(StoreError::Timeout(limit)))
}

/// Map a store failure and log it once
pub(crate) fn store_failure(err: StoreError) -> AuthError {
    if matches!(err, StoreError::UserNotFound | StoreError::AppNotFound) {
        tracing::debug!(cause = %err, "lookup missed");
    }
    AuthError::from(err).logged()
}

/// Run CPU-bound work (hashing) on the blocking pool
pub(crate) async fn blocking<T, F>(work: F) -> AuthResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::internal(e).logged())
}
