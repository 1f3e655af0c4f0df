//! Auth Error Types
//!
//! The closed set of failures the auth service reports. Causes of internal
//! failures are kept for logging and never rendered to callers.

use std::error::Error as StdError;

use kernel::error::app_error::AppError;
use thiserror::Error;

use crate::domain::repository::StoreError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Boxed underlying cause of an internal failure
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required input missing or empty
    #[error("{} must be provided", join_fields(.0))]
    MissingFields(Vec<&'static str>),

    /// Unknown email, wrong password, unknown application or unknown user
    #[error("invalid credentials")]
    InvalidCredentials,

    /// E-mail already registered
    #[error("user already exists")]
    AlreadyExists,

    /// Storage, hashing or signing failure
    #[error("internal server error")]
    Internal(#[source] BoxError),
}

impl AuthError {
    /// Wrap an unexpected failure
    pub fn internal(cause: impl Into<BoxError>) -> Self {
        AuthError::Internal(cause.into())
    }

    /// Convert to the rendered error for a failed operation
    ///
    /// Missing fields stay a client error. Every domain error is reported as
    /// a server error prefixed with the operation, e.g.
    /// `failed to login: invalid credentials`.
    pub fn into_app_error(self, operation: &str) -> AppError {
        match self {
            AuthError::MissingFields(_) => AppError::bad_request(self.to_string()),
            _ => AppError::internal(format!("failed to {}: {}", operation, self)).with_source(self),
        }
    }

    /// Log once, at the level the variant deserves
    ///
    /// Emitted inside the use case span, which carries the operation and
    /// identifying fields.
    pub fn log(&self) {
        match self {
            AuthError::Internal(source) => {
                tracing::error!(error = %source, "Auth internal error");
            }
            AuthError::InvalidCredentials | AuthError::AlreadyExists => {
                tracing::info!(error = %self, "Auth rejected");
            }
            AuthError::MissingFields(_) => {
                tracing::debug!(error = %self, "Auth input rejected");
            }
        }
    }

    /// [`log`](Self::log) and pass through
    pub fn logged(self) -> Self {
        self.log();
        self
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserAlreadyExists => AuthError::AlreadyExists,
            StoreError::UserNotFound | StoreError::AppNotFound => AuthError::InvalidCredentials,
            other => AuthError::internal(other),
        }
    }
}

/// Build a [`AuthError::MissingFields`] from `(field, is_missing)` checks
///
/// Returns `None` when every field is present.
pub fn missing_fields<const N: usize>(checks: [(&'static str, bool); N]) -> Option<AuthError> {
    let missing: Vec<&'static str> = checks
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect();

    (!missing.is_empty()).then_some(AuthError::MissingFields(missing))
}

/// "a", "a and b", "a, b and c"
fn join_fields(fields: &[&'static str]) -> String {
    match fields {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
