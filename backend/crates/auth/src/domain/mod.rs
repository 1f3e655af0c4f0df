//! Domain Layer
//!
//! Contains entities, value objects, store capability traits and the
//! hashing/signing seams the use cases depend on.

pub mod entity;
pub mod repository;
pub mod security;
pub mod value_object;

// Re-exports
pub use entity::{app::App, user::User};
pub use repository::{AdminSetter, AppProvider, CredentialStore, UserProvider, UserSaver};
pub use security::{PasswordHasher, TokenIssuer};
