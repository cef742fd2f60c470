// ABOUTME: Focused dependency injection contexts for request handlers
// ABOUTME: Splits authentication services from data access
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Focused dependency injection contexts
//!
//! - `AuthContext`: token manager, password hasher, cookie policy
//! - `DataContext`: credential store
//! - `ServerContext`: both, cloned into axum state

pub mod auth;
pub mod data;
pub mod server;

pub use auth::AuthContext;
pub use data::DataContext;
pub use server::ServerContext;
