//! API DTOs (Data Transfer Objects)
//!
//! Absent request fields deserialize to their empty or zero value and are
//! rejected by `validate` with the names of every missing field.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{app_id::AppId, user_id::UserId};
use crate::error::{AuthError, missing_fields};

fn check<const N: usize>(checks: [(&'static str, bool); N]) -> Result<(), AuthError> {
    missing_fields(checks).map_or(Ok(()), Err)
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        check([
            ("email", self.email.is_empty()),
            ("password", self.password.is_empty()),
        ])
    }
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: UserId,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: AppId,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        check([
            ("email", self.email.is_empty()),
            ("password", self.password.is_empty()),
            ("app_id", self.app_id.is_unset()),
        ])
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Logout
// ============================================================================

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoutRequest {
    pub token: String,
}

impl LogoutRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        check([("token", self.token.is_empty())])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub is_logged_out: bool,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IsAdminRequest {
    pub user_id: UserId,
}

impl IsAdminRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        check([("user_id", self.user_id.is_unset())])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetAdminRequest {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl SetAdminRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        check([("user_id", self.user_id.is_unset())])
    }
}

/// Admin flag response, shared by is-admin and set-admin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_defaults_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"password":"pw"}"#).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "email and app_id must be provided");
    }

    #[test]
    fn test_camel_case_fields() {
        let req: SetAdminRequest =
            serde_json::from_str(r#"{"userId":7,"isAdmin":true}"#).unwrap();
        assert_eq!(req.user_id.get(), 7);
        assert!(req.is_admin);
        assert!(req.validate().is_ok());

        let body = serde_json::to_value(LogoutResponse {
            is_logged_out: false,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "isLoggedOut": false }));
    }

    #[test]
    fn test_zero_user_id_is_missing() {
        let req: IsAdminRequest = serde_json::from_str(r#"{"userId":0}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "user_id must be provided"
        );
    }
}
