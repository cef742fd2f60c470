// ABOUTME: Credential store backed by SQLite through sqlx
// ABOUTME: Owns the connection pool, runs migrations and defines the UserStore seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! The store is a single `users` table. Handlers never see the pool directly:
//! they go through [`UserStore`], which [`Database`] implements.

mod users;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;
use weatherapp_core::errors::database::DatabaseError;
use weatherapp_core::models::User;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, DatabaseError>;

/// Account persistence used by the HTTP handlers
///
/// Update and delete operations return `false` when no row matched.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; uniqueness conflicts surface as `UniqueViolation`
    async fn create_user(&self, user: &User) -> StoreResult<Uuid>;

    /// Get user by id
    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Get user by username
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Get the user matching both username and email
    async fn get_user_by_username_and_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>>;

    /// All users ordered by creation time
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Change username and email
    async fn update_user_identity(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> StoreResult<bool>;

    /// Replace the stored password hash
    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> StoreResult<bool>;

    /// Grant or revoke admin rights
    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> StoreResult<bool>;

    /// Remove a user
    async fn delete_user(&self, user_id: Uuid) -> StoreResult<bool>;

    /// Total number of users
    async fn get_user_count(&self) -> StoreResult<i64>;

    /// Connectivity check for the readiness endpoint
    async fn ping(&self) -> StoreResult<()>;
}

/// SQLite-backed credential store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the file cannot be opened or a
    /// migration fails
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("invalid database url {database_url}: {e}"),
            })?
            .create_if_missing(true);

        let is_memory = database_url.contains(":memory:");
        if !is_memory {
            Self::ensure_parent_dir(options.get_filename())?;
        }

        // Every connection to an in-memory database is a separate database
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("failed to open {database_url}: {e}"),
            })?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(database = %database_url, "Database ready");
        Ok(db)
    }

    fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| DatabaseError::ConnectionError {
                    context: format!("cannot create {}: {e}", parent.display()),
                })
            }
            _ => Ok(()),
        }
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> StoreResult<()> {
        self.migrate_users().await
    }
}
