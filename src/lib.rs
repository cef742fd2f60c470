// ABOUTME: Library root for the weather app backend
// ABOUTME: Account registration, stateless session tokens and user administration over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Weather App Server
//!
//! The authentication and account core of the weather app backend:
//!
//! - **Credential store**: SQLite `users` table behind the `UserStore` trait
//! - **Password hashing**: salted bcrypt with a configurable cost
//! - **Session tokens**: HS256 JWTs carrying the user id and admin flag
//! - **Token verification**: axum middleware reading the `token` cookie
//! - **Session transport**: `HttpOnly`, `SameSite=Strict` cookie
//!
//! Sessions are stateless; the server keeps no session table.

/// Session token issuance and verification
pub mod auth;

/// Admin account bootstrap
pub mod bootstrap;

/// Environment-driven configuration
pub mod config;

/// Defaults, names and client-facing messages
pub mod constants;

/// Dependency injection contexts
pub mod context;

/// Password hashing
pub mod crypto;

/// Credential store
pub mod database;

/// Unified error types
pub mod errors;

/// Structured logging
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Session cookies
pub mod security;

/// Router assembly and serving
pub mod server;
