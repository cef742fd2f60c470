// ABOUTME: Security utilities for the HTTP session transport
// ABOUTME: Groups cookie handling for the session token
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Session cookie construction and parsing
pub mod cookies;
