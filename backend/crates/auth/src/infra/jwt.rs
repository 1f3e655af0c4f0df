//! Session Token Issuer
//!
//! HS256 tokens keyed by the application's secret.

use std::time::Duration;

use chrono::Utc;
use platform::token::{TokenError, sign_hs256, verify_hs256};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{app::App, user::User};
use crate::domain::security::TokenIssuer;
use crate::domain::value_object::app_secret::AppSecret;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub email: String,
    pub app_id: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

/// Stateless JWT issuer
#[derive(Debug, Default, Clone, Copy)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            user_id: user.id.get(),
            email: user.email.as_str().to_owned(),
            app_id: app.id.get(),
            exp: Utc::now().timestamp().saturating_add(ttl_secs),
        };

        sign_hs256(&claims, app.secret.expose())
    }
}

/// Verify a session token against an application's secret
pub fn decode_session_token(token: &str, secret: &AppSecret) -> Result<SessionClaims, TokenError> {
    verify_hs256(token, secret.expose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{app_id::AppId, email::Email, user_id::UserId};
    use platform::password::{Argon2Hasher, ClearTextPassword, HashCost};

    fn user() -> User {
        User {
            id: UserId::new(1),
            email: Email::new("a@x.com").unwrap(),
            password_hash: Argon2Hasher::new(HashCost::minimal())
                .unwrap()
                .hash(&ClearTextPassword::new("Secret123!".to_string()).unwrap())
                .unwrap(),
            is_admin: false,
        }
    }

    fn app(secret: &str) -> App {
        App {
            id: AppId::new(1),
            name: "test".to_string(),
            secret: AppSecret::from(secret.to_string()),
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let app = app("default_secret");
        let ttl = Duration::from_secs(3600);
        let issued_at = Utc::now().timestamp();

        let token = JwtTokenIssuer::new().issue(&user(), &app, ttl).unwrap();
        let claims = decode_session_token(&token, &app.secret).unwrap();

        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.app_id, 1);
        assert!((claims.exp - (issued_at + 3600)).abs() <= 1);
    }

    #[test]
    fn test_other_app_secret_rejected() {
        let token = JwtTokenIssuer::new()
            .issue(&user(), &app("default_secret"), Duration::from_secs(60))
            .unwrap();

        let other = AppSecret::from("other_secret".to_string());
        assert!(decode_session_token(&token, &other).is_err());
    }

    #[test]
    fn test_empty_secret_refused() {
        let result = JwtTokenIssuer::new().issue(&user(), &app(""), Duration::from_secs(60));
        assert!(matches!(result, Err(TokenError::EmptyKey)));
    }
}
