// ABOUTME: Request and response types for admin routes
// ABOUTME: Defines DTOs for listing and editing user accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use weatherapp_core::models::UserInfo;

/// All users, without password hashes
#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    /// Users ordered by creation time
    pub users: Vec<UserInfo>,
}

/// Admin edit of a user's identity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New username
    #[serde(default)]
    pub username: Option<String>,
    /// New email
    #[serde(default)]
    pub email: Option<String>,
}
