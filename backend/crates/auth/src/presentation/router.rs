//! Auth Router

use axum::{Router, routing::post};

use crate::application::service::AuthService;
use crate::domain::repository::CredentialStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any credential store
///
/// Routes are relative; the binary nests them under `/api/auth`.
pub fn auth_router<R>(service: AuthService<R>) -> Router
where
    R: CredentialStore,
{
    let state = AuthAppState { service };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/is-admin", post(handlers::is_admin::<R>))
        .route("/set-admin", post(handlers::set_admin::<R>))
        .with_state(state)
}
