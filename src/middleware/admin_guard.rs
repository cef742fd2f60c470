// ABOUTME: Central admin authorization guard for routes requiring admin privileges
// ABOUTME: Checks the admin flag carried by the verified token and returns 403 if absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin Authorization Guard
//!
//! The admin flag comes from the verified token, so no database lookup is
//! needed. A user demoted after login keeps admin access until the token expires.

use crate::auth::AuthUser;
use crate::constants::messages;
use crate::errors::AppError;
use crate::logging::AppLogger;

/// Require admin privileges for the authenticated user
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` (403) if the token's admin flag is false
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.is_admin {
        return Ok(());
    }

    AppLogger::log_security_event(
        "admin_access_denied",
        "medium",
        "non-admin token used on admin route",
        Some(&auth.user_id.to_string()),
    );
    Err(AppError::permission_denied(messages::ADMIN_REQUIRED))
}
