//! User Entity
//!
//! Identity record. The password hash never leaves the service.

use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique e-mail
    pub email: Email,
    /// PHC-formatted Argon2 hash (redacted in `Debug`)
    pub password_hash: HashedPassword,
    /// Coarse administrative role
    pub is_admin: bool,
}
