// ABOUTME: Request and response types for authentication routes
// ABOUTME: Defines camelCase DTOs for registration, login, logout and password reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication request and response types
//!
//! Request fields are optional so that a missing field produces the
//! route's own validation message instead of a deserialization error.

use serde::{Deserialize, Serialize};
use weatherapp_core::models::UserInfo;

/// User registration request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired username
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Request admin rights at creation
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created user
    pub user: UserInfo,
    /// Session token for API clients
    pub token: String,
}

/// User login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Username
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password
    #[serde(default)]
    pub password: Option<String>,
}

/// User login response; the token itself travels in the cookie
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// "Login successful Admin" or "Login successful User"
    pub message: String,
    /// Admin flag so the front end can pick a landing page
    pub is_admin: bool,
}

/// Password reset request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    /// Account email
    #[serde(default)]
    pub email: Option<String>,
    /// Account username
    #[serde(default)]
    pub username: Option<String>,
    /// Replacement password
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Session check response
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    /// Current user
    pub user: UserInfo,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
