//! PostgreSQL Credential Store

use chrono::Utc;
use sqlx::PgPool;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{
    AdminSetter, AppProvider, StoreError, StoreResult, UserProvider, UserSaver,
};
use crate::domain::value_object::{
    app_id::AppId, app_secret::AppSecret, email::Email, user_id::UserId,
};
use platform::password::HashedPassword;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Users
// ============================================================================

impl UserSaver for PgCredentialStore {
    async fn save_user(&self, email: &Email, password_hash: &HashedPassword) -> StoreResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, pass_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_bytes())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::UserAlreadyExists
            }
            e => StoreError::Database(e),
        })?;

        Ok(UserId::new(id))
    }
}

impl UserProvider for PgCredentialStore {
    async fn user_by_email(&self, email: &Email) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                pass_hash,
                is_admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::UserNotFound)?.into_user()
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::UserNotFound)
    }
}

impl AdminSetter for PgCredentialStore {
    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE users SET
                is_admin = $2
            WHERE id = $1
            RETURNING is_admin
            "#,
        )
        .bind(user_id.get())
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::UserNotFound)
    }
}

// ============================================================================
// Apps
// ============================================================================

impl AppProvider for PgCredentialStore {
    async fn app_by_id(&self, app_id: AppId) -> StoreResult<App> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT
                id,
                name,
                secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.ok_or(StoreError::AppNotFound)?.into_app())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
    is_admin: bool,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let password_hash = HashedPassword::from_phc_bytes(self.pass_hash)
            .map_err(|e| StoreError::Corrupted(format!("user {}: {}", self.id, e)))?;

        Ok(User {
            id: UserId::new(self.id),
            email: Email::from_db(self.email),
            password_hash,
            is_admin: self.is_admin,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl AppRow {
    fn into_app(self) -> App {
        App {
            id: AppId::new(self.id),
            name: self.name,
            secret: AppSecret::from(self.secret),
        }
    }
}
