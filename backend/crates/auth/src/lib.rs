//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store capability traits
//! - `application/` - Use cases and the `AuthService` facade
//! - `infra/` - Postgres and in-memory stores, Argon2 and JWT adapters
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration with email + password
//! - Login scoped to a calling application, returning an HS256 session token
//!   signed with that application's secret
//! - Coarse admin flag (check and set)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (configurable cost)
//! - Unknown email, wrong password and unknown application are
//!   indistinguishable to callers
//! - Internal failure causes are logged, never returned
//! - E-mail uniqueness is enforced by the store, not by a pre-check

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{config::AuthConfig, service::AuthService};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, JwtTokenIssuer, PgCredentialStore};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{
        AdminSetter, AppProvider, CredentialStore, StoreError, StoreResult, UserProvider,
        UserSaver,
    };
    pub use crate::infra::{InMemoryCredentialStore, PgCredentialStore};
}
