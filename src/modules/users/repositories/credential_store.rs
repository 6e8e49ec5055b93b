use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::MySqlPool;
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::users::models::{AppUser, Role};

/// Lookup of API accounts for authentication
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>>;

    /// Create the account, or replace its hash and role when it exists
    async fn upsert(&self, user: &AppUser) -> Result<()>;
}

pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, password_hash, role
            FROM app_users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn upsert(&self, user: &AppUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO app_users (username, password_hash, role)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE password_hash = VALUES(password_hash), role = VALUES(role)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> Result<AppUser> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| AppError::internal(format!("Invalid role in database: {}", e)))?;

        Ok(AppUser::new(self.username, self.password_hash, role))
    }
}

#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, AppUser>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn upsert(&self, user: &AppUser) -> Result<()> {
        self.users
            .write()
            .await
            .insert(user.username.clone(), user.clone());
        Ok(())
    }
}
