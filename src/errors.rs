// ABOUTME: Error types used across the server crate
// ABOUTME: Re-exports the unified AppError system from weatherapp-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors
//!
//! The error system lives in `weatherapp-core` so the admin tooling shares it;
//! this module re-exports it under the server crate's namespace.

pub use weatherapp_core::errors::database::DatabaseError;
pub use weatherapp_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
