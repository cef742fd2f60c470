// ABOUTME: Route module organization for the weather app HTTP endpoints
// ABOUTME: Groups auth, admin and health routes plus shared request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to a service type.

/// Admin user management routes
pub mod admin;
/// Registration, login, logout, session check and password reset
pub mod auth;
/// Liveness and readiness endpoints
pub mod health;

pub use admin::AdminRoutes;
pub use auth::{AuthRoutes, AuthService};
pub use health::HealthRoutes;

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use axum::{extract::rejection::JsonRejection, Json};
use weatherapp_core::errors::database::DatabaseError;

/// Unwrap a JSON body, reporting malformed payloads as `INVALID_INPUT`
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// A field counts as present when it is not empty or whitespace
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Translate a store uniqueness failure into the matching conflict message
pub(crate) fn map_user_conflict(error: DatabaseError) -> AppError {
    if let DatabaseError::UniqueViolation { context } = &error {
        let message = if context.contains("users.email") {
            messages::EMAIL_EXISTS
        } else if context.contains("users.username") {
            messages::USERNAME_EXISTS
        } else {
            return AppError::from(error);
        };
        return AppError::already_exists(message).with_source(error);
    }
    AppError::from(error)
}
