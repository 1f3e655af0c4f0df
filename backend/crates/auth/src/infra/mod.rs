//! Infrastructure Layer
//!
//! Store implementations and the hashing and signing adapters.

pub mod hasher;
pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::{JwtTokenIssuer, SessionClaims, decode_session_token};
pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;
