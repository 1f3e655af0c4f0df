//! Compact Signed Tokens (JWS, HS256)
//!
//! Thin wrapper over `jsonwebtoken` fixing the algorithm to HS256.
//! Claim types are supplied by the caller; the only claim this module
//! relies on is the standard `exp`, which verification requires.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Signing algorithm shared by issuers and verifiers
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token signing/verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// An empty key would produce a token anyone can forge
    #[error("Signing key must not be empty")]
    EmptyKey,

    /// Encoding or signing failed
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Signature, format or expiry check failed
    #[error("Token verification failed: {0}")]
    Verification(#[source] jsonwebtoken::errors::Error),
}

/// Sign `claims` with an HS256 key
pub fn sign_hs256<C: Serialize>(claims: &C, key: &[u8]) -> Result<String, TokenError> {
    if key.is_empty() {
        return Err(TokenError::EmptyKey);
    }

    jsonwebtoken::encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(key),
    )
    .map_err(TokenError::Signing)
}

/// Verify an HS256 token and decode its claims
///
/// Rejects expired tokens (default 60s leeway) and tokens without `exp`.
pub fn verify_hs256<C: DeserializeOwned>(token: &str, key: &[u8]) -> Result<C, TokenError> {
    if key.is_empty() {
        return Err(TokenError::EmptyKey);
    }

    let validation = Validation::new(ALGORITHM);
    jsonwebtoken::decode::<C>(token, &DecodingKey::from_secret(key), &validation)
        .map(|data| data.claims)
        .map_err(TokenError::Verification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    #[test]
    fn test_sign_and_verify() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now() + 600,
        };
        let token = sign_hs256(&claims, b"app-secret").unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: Claims = verify_hs256(&token, b"app-secret").unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now() + 600,
        };
        let token = sign_hs256(&claims, b"app-one").unwrap();

        let result = verify_hs256::<Claims>(&token, b"app-two");
        assert!(matches!(result, Err(TokenError::Verification(_))));
    }

    #[test]
    fn test_expired_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now() - 3600,
        };
        let token = sign_hs256(&claims, b"app-secret").unwrap();

        assert!(verify_hs256::<Claims>(&token, b"app-secret").is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now() + 600,
        };
        assert!(matches!(
            sign_hs256(&claims, b""),
            Err(TokenError::EmptyKey)
        ));
        assert!(matches!(
            verify_hs256::<Claims>("a.b.c", b""),
            Err(TokenError::EmptyKey)
        ));
    }

    #[test]
    fn test_header_algorithm() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now() + 600,
        };
        let token = sign_hs256(&claims, b"app-secret").unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }
}
