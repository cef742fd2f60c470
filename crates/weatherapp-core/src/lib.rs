// ABOUTME: Core types for the weather app backend
// ABOUTME: Foundation crate with error handling and account models
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Weather App Core
//!
//! Shared types for the weather app backend. This crate changes rarely and
//! carries no server wiring, so the server crate and the admin tooling can both
//! depend on it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the store-level `DatabaseError`
//! - **models**: `User` account record and its public projection `UserInfo`

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Account data models
pub mod models;
