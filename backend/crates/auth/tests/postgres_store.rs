//! PostgreSQL credential store tests
//!
//! Need a live database: `DATABASE_URL=postgres://... cargo test -- --ignored`

use auth::models::{app_id::AppId, email::Email, user_id::UserId};
use auth::store::{AdminSetter, AppProvider, PgCredentialStore, StoreError, UserProvider, UserSaver};
use platform::password::{Argon2Hasher, ClearTextPassword, HashCost, HashedPassword};
use sqlx::PgPool;

fn hash(password: &str) -> HashedPassword {
    Argon2Hasher::new(HashCost::minimal())
        .unwrap()
        .hash(&ClearTextPassword::new(password.to_string()).unwrap())
        .unwrap()
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_save_and_find_user(pool: PgPool) {
    let store = PgCredentialStore::new(pool);
    let email = Email::new("a@x.com").unwrap();
    let password_hash = hash("Secret123!");

    let id = store.save_user(&email, &password_hash).await.unwrap();
    assert!(id.get() > 0);

    let user = store.user_by_email(&email).await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email, email);
    assert_eq!(user.password_hash, password_hash);
    assert!(!user.is_admin);
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email(pool: PgPool) {
    let store = PgCredentialStore::new(pool);
    let email = Email::new("a@x.com").unwrap();

    store.save_user(&email, &hash("one")).await.unwrap();
    let result = store.save_user(&email, &hash("two")).await;

    assert!(matches!(result, Err(StoreError::UserAlreadyExists)));
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_admin_flag(pool: PgPool) {
    let store = PgCredentialStore::new(pool);
    let id = store
        .save_user(&Email::new("a@x.com").unwrap(), &hash("Secret123!"))
        .await
        .unwrap();

    assert!(!store.is_admin(id).await.unwrap());
    assert!(store.set_admin(id, true).await.unwrap());
    assert!(store.is_admin(id).await.unwrap());

    assert!(matches!(
        store.is_admin(UserId::new(id.get() + 1)).await,
        Err(StoreError::UserNotFound)
    ));
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_app_lookup(pool: PgPool) {
    sqlx::query("INSERT INTO apps (id, name, secret) VALUES (1, 'test', 'default_secret')")
        .execute(&pool)
        .await
        .unwrap();

    let store = PgCredentialStore::new(pool);

    let app = store.app_by_id(AppId::new(1)).await.unwrap();
    assert_eq!(app.name, "test");
    assert_eq!(app.secret.expose(), b"default_secret");

    assert!(matches!(
        store.app_by_id(AppId::new(2)).await,
        Err(StoreError::AppNotFound)
    ));
}
