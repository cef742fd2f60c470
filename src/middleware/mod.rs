// ABOUTME: HTTP middleware for request tracing, authentication and CORS
// ABOUTME: Provides request IDs, session token verification and the admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Admin authorization guard
pub mod admin_guard;
/// Session token verification
pub mod auth;
/// Cross-origin configuration
pub mod cors;
/// Request correlation ids
pub mod request_id;

pub use admin_guard::require_admin;
pub use auth::require_auth;
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
