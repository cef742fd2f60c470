// ABOUTME: Authentication context for dependency injection of auth-related services
// ABOUTME: Contains the token manager, password hasher and session cookie policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::auth::AuthManager;
use crate::crypto::PasswordHasher;
use std::sync::Arc;

/// Authentication context containing auth-related dependencies
///
/// # Dependencies
/// - `auth_manager`: token issuance and verification
/// - `password_hasher`: bcrypt with the configured cost
/// - `secure_cookies`: whether session cookies carry `Secure`
#[derive(Clone)]
pub struct AuthContext {
    auth_manager: Arc<AuthManager>,
    password_hasher: PasswordHasher,
    secure_cookies: bool,
}

impl AuthContext {
    /// Create new authentication context
    #[must_use]
    pub const fn new(
        auth_manager: Arc<AuthManager>,
        password_hasher: PasswordHasher,
        secure_cookies: bool,
    ) -> Self {
        Self {
            auth_manager,
            password_hasher,
            secure_cookies,
        }
    }

    /// Get auth manager for token operations
    #[must_use]
    pub const fn auth_manager(&self) -> &Arc<AuthManager> {
        &self.auth_manager
    }

    /// Get password hasher
    #[must_use]
    pub const fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Whether session cookies are marked `Secure`
    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Session cookie lifetime, matching the token lifetime
    #[must_use]
    pub fn session_max_age_secs(&self) -> i64 {
        self.auth_manager.token_expiry_hours() * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_lifetime_follows_token_expiry() {
        let auth = AuthContext::new(
            Arc::new(AuthManager::new(b"context-test-secret-0123456789abcdef", 24)),
            PasswordHasher::new(4),
            true,
        );
        assert_eq!(auth.session_max_age_secs(), 24 * 3600);
        assert!(auth.secure_cookies());
    }
}
