// ABOUTME: User account model and its public, hash-free projection
// ABOUTME: The password hash stays on User and never appears in UserInfo
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stored user account
///
/// Not serializable on purpose: responses go through [`UserInfo`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Whether the user may call admin routes
    pub is_admin: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last time the account was modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String, is_admin: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public projection without the password hash
    #[must_use]
    pub fn info(&self) -> UserInfo {
        UserInfo::from(self)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User identity as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Unique user identifier
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Admin flag
    pub is_admin: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "$2b$10$secrethash".into(),
            false,
        );
        let debug = format!("{user:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secrethash"));
    }

    #[test]
    fn test_user_info_serializes_camel_case_without_hash() {
        let user = User::new(
            "bob".into(),
            "bob@example.com".into(),
            "$2b$10$secrethash".into(),
            true,
        );
        let json = serde_json::to_value(user.info()).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert_eq!(json["username"], "bob");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
