// ABOUTME: Admin route module for user account management
// ABOUTME: Mounts the user routes behind session verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin routes
//!
//! Every route here first passes [`require_auth`]; handlers then call
//! `require_admin` on the decoded token.

/// Admin request and response DTOs
pub mod types;
mod users;

use crate::context::ServerContext;
use crate::middleware::require_auth;
use axum::{
    middleware,
    routing::{get, put},
    Router,
};

/// Admin routes implementation
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    pub fn routes(context: ServerContext) -> Router {
        Router::new()
            .route("/users", get(users::handle_list_users))
            .route(
                "/users/:user_id",
                put(users::handle_update_user).delete(users::handle_delete_user),
            )
            .route_layer(middleware::from_fn_with_state(
                context.clone(),
                require_auth,
            ))
            .with_state(context)
    }
}
