//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::application::service::AuthService;
use crate::domain::repository::CredentialStore;
use crate::error::AuthError;
use crate::presentation::dto::{
    AdminResponse, IsAdminRequest, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    RegisterRequest, RegisterResponse, SetAdminRequest,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: CredentialStore,
{
    pub service: AuthService<R>,
}

impl<R> Clone for AuthAppState<R>
where
    R: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// A failed operation, rendered as a problem document
#[derive(Debug)]
pub struct ApiError {
    operation: &'static str,
    error: AuthError,
}

impl ApiError {
    fn on(operation: &'static str) -> impl FnOnce(AuthError) -> Self {
        move |error| Self { operation, error }
    }
}

// Already logged where it occurred
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.into_app_error(self.operation).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse>
where
    R: CredentialStore,
{
    req.validate().map_err(ApiError::on("register"))?;

    let user_id = state
        .service
        .register(req.email, req.password)
        .await
        .map_err(ApiError::on("register"))?;

    Ok(Json(RegisterResponse { user_id }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse>
where
    R: CredentialStore,
{
    req.validate().map_err(ApiError::on("login"))?;

    let token = state
        .service
        .login(req.email, req.password, req.app_id)
        .await
        .map_err(ApiError::on("login"))?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LogoutRequest>,
) -> ApiResult<LogoutResponse>
where
    R: CredentialStore,
{
    req.validate().map_err(ApiError::on("logout"))?;

    let is_logged_out = state
        .service
        .logout(&req.token)
        .await
        .map_err(ApiError::on("logout"))?;

    Ok(Json(LogoutResponse { is_logged_out }))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/auth/is-admin
pub async fn is_admin<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<IsAdminRequest>,
) -> ApiResult<AdminResponse>
where
    R: CredentialStore,
{
    req.validate().map_err(ApiError::on("check admin"))?;

    let is_admin = state
        .service
        .is_admin(req.user_id)
        .await
        .map_err(ApiError::on("check admin"))?;

    Ok(Json(AdminResponse { is_admin }))
}

/// POST /api/auth/set-admin
pub async fn set_admin<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SetAdminRequest>,
) -> ApiResult<AdminResponse>
where
    R: CredentialStore,
{
    req.validate().map_err(ApiError::on("set admin"))?;

    let is_admin = state
        .service
        .set_admin(req.user_id, req.is_admin)
        .await
        .map_err(ApiError::on("set admin"))?;

    Ok(Json(AdminResponse { is_admin }))
}
