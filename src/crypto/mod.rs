// ABOUTME: Cryptography module for credential handling
// ABOUTME: Centralizes password hashing for the weather app server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cryptographic utilities

/// bcrypt password hashing
pub mod password;

pub use password::PasswordHasher;
