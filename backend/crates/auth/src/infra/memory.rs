//! In-Memory Credential Store
//!
//! Process-local store for tests and local runs. A single lock guards the
//! e-mail index, so the uniqueness check and the insert are one step.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{
    AdminSetter, AppProvider, StoreError, StoreResult, UserProvider, UserSaver,
};
use crate::domain::value_object::{app_id::AppId, email::Email, user_id::UserId};
use platform::password::HashedPassword;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    emails: HashMap<Email, UserId>,
    apps: HashMap<AppId, App>,
    last_user_id: i64,
}

/// In-memory credential store
#[derive(Default)]
pub struct InMemoryCredentialStore {
    tables: RwLock<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with applications
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> Self {
        let tables = Tables {
            apps: apps.into_iter().map(|app| (app.id, app)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

impl UserSaver for InMemoryCredentialStore {
    async fn save_user(&self, email: &Email, password_hash: &HashedPassword) -> StoreResult<UserId> {
        let mut tables = self.tables.write().await;

        if tables.emails.contains_key(email) {
            return Err(StoreError::UserAlreadyExists);
        }

        tables.last_user_id += 1;
        let id = UserId::new(tables.last_user_id);

        tables.emails.insert(email.clone(), id);
        tables.users.insert(
            id,
            User {
                id,
                email: email.clone(),
                password_hash: password_hash.clone(),
                is_admin: false,
            },
        );

        Ok(id)
    }
}

impl UserProvider for InMemoryCredentialStore {
    async fn user_by_email(&self, email: &Email) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .emails
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        self.tables
            .read()
            .await
            .users
            .get(&user_id)
            .map(|user| user.is_admin)
            .ok_or(StoreError::UserNotFound)
    }
}

impl AppProvider for InMemoryCredentialStore {
    async fn app_by_id(&self, app_id: AppId) -> StoreResult<App> {
        self.tables
            .read()
            .await
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StoreError::AppNotFound)
    }
}

impl AdminSetter for InMemoryCredentialStore {
    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound)?;
        user.is_admin = is_admin;
        Ok(user.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::app_secret::AppSecret;
    use platform::password::{Argon2Hasher, ClearTextPassword, HashCost};

    fn hash() -> HashedPassword {
        let password = ClearTextPassword::new("Secret123!".to_string()).unwrap();
        Argon2Hasher::new(HashCost::minimal())
            .unwrap()
            .hash(&password)
            .unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_positive() {
        let store = InMemoryCredentialStore::new();
        let a = store
            .save_user(&Email::new("a@x.com").unwrap(), &hash())
            .await
            .unwrap();
        let b = store
            .save_user(&Email::new("b@x.com").unwrap(), &hash())
            .await
            .unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryCredentialStore::new();
        let email = Email::new("a@x.com").unwrap();
        store.save_user(&email, &hash()).await.unwrap();

        let result = store.save_user(&email, &hash()).await;
        assert!(matches!(result, Err(StoreError::UserAlreadyExists)));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_admin_flag() {
        let store = InMemoryCredentialStore::new();
        let id = store
            .save_user(&Email::new("a@x.com").unwrap(), &hash())
            .await
            .unwrap();

        assert!(!store.is_admin(id).await.unwrap());
        assert!(store.set_admin(id, true).await.unwrap());
        assert!(store.is_admin(id).await.unwrap());

        let missing = store.set_admin(UserId::new(99), true).await;
        assert!(matches!(missing, Err(StoreError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_apps() {
        let store = InMemoryCredentialStore::with_apps([App {
            id: AppId::new(1),
            name: "test".to_string(),
            secret: AppSecret::from("default_secret".to_string()),
        }]);

        assert_eq!(store.app_by_id(AppId::new(1)).await.unwrap().name, "test");
        assert!(matches!(
            store.app_by_id(AppId::new(2)).await,
            Err(StoreError::AppNotFound)
        ));
    }
}
