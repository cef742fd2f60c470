// ABOUTME: Core account data models for the weather app backend
// ABOUTME: Re-exports the stored User record and its public projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! - `User`: the stored account record, including the password hash
//! - `UserInfo`: what the API is allowed to return about a user

mod user;

pub use user::{User, UserInfo};
