//! Password Hashing and Verification
//!
//! Adaptive, salted one-way hashing with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - A configurable work factor ([`HashCost`])
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! The salt and the cost parameters are embedded in the PHC-formatted digest,
//! so verification always uses the parameters a hash was created with.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty
    #[error("Password cannot be empty")]
    Empty,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Work factor
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Only for tests.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Secret123!".to_string()).unwrap();
/// assert!(format!("{:?}", password).contains("REDACTED"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password
    ///
    /// Unicode is normalized using NFKC so that visually identical input
    /// hashes identically. The raw input is zeroized.
    pub fn new(mut raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        Ok(Self(normalized))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and hash.
/// Stores persist it as raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Create from the stored byte form of a PHC string
    pub fn from_phc_bytes(bytes: Vec<u8>) -> Result<Self, PasswordHashError> {
        let hash = String::from_utf8(bytes).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Self::from_phc_string(hash)
    }

    /// Get the PHC string
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Get the PHC string bytes for storage
    pub fn as_bytes(&self) -> &[u8] {
        self.hash.as_bytes()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id password hasher bound to a [`HashCost`]
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Build a hasher, rejecting cost parameters Argon2 does not accept
    pub fn new(cost: HashCost) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash the password with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `false` on mismatch and on an unparseable hash; never errors.
    pub fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Parameters come from the parsed hash; Argon2 compares in constant time
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(HashCost::minimal()).unwrap()
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new(String::new());
        assert!(matches!(result, Err(PasswordPolicyError::Empty)));
    }

    #[test]
    fn test_unicode_password_normalized() {
        // U+FB01 (ligature) normalizes to "fi" under NFKC
        let hashed = hasher().hash(&password("\u{FB01}rewall-42")).unwrap();
        assert!(hasher().verify(&hashed, &password("firewall-42")));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hashed = hasher.hash(&password("TestPassword123!")).unwrap();

        assert!(hasher.verify(&hashed, &password("TestPassword123!")));
        assert!(!hasher.verify(&hashed, &password("WrongPassword123!")));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash(&password("same-input")).unwrap();
        let second = hasher.hash(&password("same-input")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_digest_embeds_cost() {
        let cost = HashCost {
            memory_kib: 64,
            iterations: 3,
            parallelism: 1,
        };
        let hashed = Argon2Hasher::new(cost)
            .unwrap()
            .hash(&password("cost-check"))
            .unwrap();

        let phc = hashed.as_phc_string();
        assert!(phc.starts_with("$argon2id$"));
        assert!(phc.contains("m=64,t=3,p=1"));
    }

    #[test]
    fn test_verify_with_different_cost_hasher() {
        let strong = Argon2Hasher::new(HashCost {
            memory_kib: 64,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let hashed = strong.hash(&password("portable")).unwrap();

        // A hasher configured differently still verifies using the embedded cost
        assert!(hasher().verify(&hashed, &password("portable")));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = Argon2Hasher::new(HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordHashError::InvalidCost(_))));
    }

    #[test]
    fn test_phc_bytes_roundtrip() {
        let hasher = hasher();
        let hashed = hasher.hash(&password("TestPassword123!")).unwrap();

        let restored = HashedPassword::from_phc_bytes(hashed.as_bytes().to_vec()).unwrap();
        assert!(hasher.verify(&restored, &password("TestPassword123!")));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
        assert!(HashedPassword::from_phc_bytes(vec![0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", password("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = hasher().hash(&password("secret")).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2id"));
    }
}
