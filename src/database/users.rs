// ABOUTME: User account database operations
// ABOUTME: Schema migration, row mapping and the UserStore implementation for SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Database, StoreResult, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;
use weatherapp_core::errors::database::DatabaseError;
use weatherapp_core::models::User;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_admin, created_at, updated_at";

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                is_admin BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            context: format!("users table: {e}"),
        })?;

        Ok(())
    }

    async fn fetch_one_user(&self, filter: &str, values: &[&str]) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}");
        let query = values
            .iter()
            .fold(sqlx::query(&sql), |query, value| query.bind(*value));

        query
            .fetch_optional(&self.pool)
            .await?
            .map(|row| Self::row_to_user(&row))
            .transpose()
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &SqliteRow) -> StoreResult<User> {
        let id: String = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DatabaseError::InvalidData {
                context: format!("users.id {id}: {e}"),
            })?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            is_admin: row.try_get("is_admin")?,
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: &User) -> StoreResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        self.fetch_one_user("id = $1", &[&user_id.to_string()])
            .await
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.fetch_one_user("username = $1", &[username]).await
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.fetch_one_user("email = $1", &[email]).await
    }

    async fn get_user_by_username_and_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>> {
        self.fetch_one_user("username = $1 AND email = $2", &[username, email])
            .await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, username");
        sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(Self::row_to_user)
            .collect()
    }

    async fn update_user_identity(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET username = $1, email = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(username)
        .bind(email)
        .bind(Utc::now())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
                .bind(password_hash)
                .bind(Utc::now())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET is_admin = $1, updated_at = $2 WHERE id = $3")
            .bind(is_admin)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, user_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_user_count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
