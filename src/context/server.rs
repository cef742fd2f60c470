// ABOUTME: Composed server context handed to every route as axum state
// ABOUTME: Builds the auth and data contexts from configuration and an opened store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{AuthContext, DataContext};
use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::crypto::PasswordHasher;
use crate::database::UserStore;
use std::sync::Arc;

/// Composed server context containing all focused contexts
#[derive(Clone)]
pub struct ServerContext {
    auth: AuthContext,
    data: DataContext,
}

impl ServerContext {
    /// Create new server context from focused contexts
    #[must_use]
    pub const fn new(auth: AuthContext, data: DataContext) -> Self {
        Self { auth, data }
    }

    /// Wire contexts from configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig, database: Arc<dyn UserStore>) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        ));
        let auth = AuthContext::new(
            auth_manager,
            PasswordHasher::new(config.auth.bcrypt_cost),
            config.secure_cookies(),
        );
        Self::new(auth, DataContext::new(database))
    }

    /// Get authentication context
    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Get data context
    #[must_use]
    pub const fn data(&self) -> &DataContext {
        &self.data
    }
}
