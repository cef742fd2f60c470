// ABOUTME: Out-of-band creation and promotion of administrator accounts
// ABOUTME: Backs the admin-setup binary, writing straight to the credential store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::{anyhow, Result};
use tracing::{info, warn};
use weatherapp_core::models::User;

use crate::crypto::PasswordHasher;
use crate::database::UserStore;

/// Requested admin account
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Whether the admin was inserted or an existing account was updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSetupAction {
    /// New account inserted
    Created,
    /// Existing account re-passworded and promoted
    Updated,
}

/// Result of [`ensure_admin_user`]
#[derive(Debug, Clone)]
pub struct AdminSetupOutcome {
    /// Created or updated
    pub action: AdminSetupAction,
    /// Stored account after the change
    pub user: User,
}

/// Create an admin account, or with `force` update the account holding the
/// username: new password, the requested email, and the admin flag.
///
/// # Errors
///
/// Fails on empty fields, an existing username without `force`, an email
/// owned by another account, a row that vanished mid-update, or a store error
pub async fn ensure_admin_user(
    store: &dyn UserStore,
    hasher: &PasswordHasher,
    account: AdminAccount,
    force: bool,
) -> Result<AdminSetupOutcome> {
    let AdminAccount {
        username,
        email,
        password,
    } = account;
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(anyhow!("username, email and password must not be empty"));
    }

    let existing = store.get_user_by_username(&username).await?;
    if existing.is_some() && !force {
        return Err(anyhow!("User '{username}' already exists (use --force to update)"));
    }

    if let Some(owner) = store.get_user_by_email(&email).await? {
        if existing.as_ref().map_or(true, |user| user.id != owner.id) {
            return Err(anyhow!("Email '{email}' is already used by another account"));
        }
    }

    let password_hash = hasher.hash_async(&password).await?;

    let Some(existing) = existing else {
        info!("Creating admin user: {}", username);
        let user = User::new(username, email, password_hash, true);
        store.create_user(&user).await?;
        return Ok(AdminSetupOutcome {
            action: AdminSetupAction::Created,
            user,
        });
    };

    info!("Updating existing user {}", existing.id);
    if existing.email != email {
        warn!(
            "Changing email of '{}' from {} to {}",
            existing.username, existing.email, email
        );
    }

    let missing = || anyhow!("User {} disappeared during update", existing.id);
    if !store
        .update_user_identity(existing.id, &existing.username, &email)
        .await?
    {
        return Err(missing());
    }
    if !store.update_password(existing.id, &password_hash).await? {
        return Err(missing());
    }
    if !store.set_admin(existing.id, true).await? {
        return Err(missing());
    }

    let user = store.get_user(existing.id).await?.ok_or_else(missing)?;
    Ok(AdminSetupOutcome {
        action: AdminSetupAction::Updated,
        user,
    })
}
