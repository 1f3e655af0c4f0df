//! Argon2id password hashing adapter

use platform::password::{Argon2Hasher, ClearTextPassword, HashedPassword, PasswordHashError};

use crate::domain::security::PasswordHasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        Argon2Hasher::hash(self, password)
    }

    fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        Argon2Hasher::verify(self, hashed, password)
    }
}
