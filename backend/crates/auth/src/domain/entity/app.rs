//! Application Entity
//!
//! A tenant scope. Its secret is the signing key for session tokens issued
//! within it and is used for nothing else.

use crate::domain::value_object::{app_id::AppId, app_secret::AppSecret};

/// Application entity (read-only to the auth service)
#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub secret: AppSecret,
}
