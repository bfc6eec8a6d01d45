//! User table operations

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::{User, UserRole};

/// Database row for user table
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    image: Option<String>,
    password: String,
    username: String,
    roles: String,
    extra: String,
}

impl UserRow {
    fn into_user(self) -> User {
        let roles: Vec<UserRole> =
            serde_json::from_str(&self.roles).unwrap_or_else(|_| vec![UserRole::User]);
        let extra: serde_json::Value =
            serde_json::from_str(&self.extra).unwrap_or(serde_json::Value::Null);

        User {
            id: self.id,
            username: self.username,
            password: self.password,
            image: self.image,
            roles,
            extra,
        }
    }
}

/// User table operations
pub struct UserTable;

impl UserTable {
    /// Get all users
    pub async fn all() -> Result<Vec<User>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM user").fetch_all(pool).await?;

        Ok(rows.into_iter().map(|r| r.into_user()).collect())
    }

    /// Get user by ID
    pub async fn get_by_id(id: i64) -> Result<Option<User>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Get user by username
    pub async fn get_by_username(username: &str) -> Result<Option<User>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Insert a user
    pub async fn insert(user: &User) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let roles = serde_json::to_string(&user.roles)?;
        let extra = serde_json::to_string(&user.extra)?;

        let result = sqlx::query(
            "INSERT INTO user (image, password, username, roles, extra) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.image)
        .bind(&user.password)
        .bind(&user.username)
        .bind(&roles)
        .bind(&extra)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert admin user
    pub async fn insert_admin(username: &str, password_hash: &str) -> Result<i64> {
        let user = User::admin(username.to_string(), password_hash.to_string());
        Self::insert(&user).await
    }

    /// Update only the password for a user
    pub async fn update_password(id: i64, password_hash: &str) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        sqlx::query("UPDATE user SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Get user count
    pub async fn count() -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }

    /// Check if any users exist
    pub async fn has_users() -> Result<bool> {
        Ok(Self::count().await? > 0)
    }
}
