//! Hashing and signing seams
//!
//! Both are synchronous: hashing is CPU-bound and the use cases move it onto
//! the blocking pool themselves.

use std::time::Duration;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use platform::token::TokenError;

use crate::domain::entity::{app::App, user::User};

/// One-way adaptive password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash with a fresh salt
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// `false` on mismatch; never an error
    fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool;
}

/// Mints session tokens for a user within an application
pub trait TokenIssuer: Send + Sync {
    /// Sign a token expiring `ttl` from now with the application's secret
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}
