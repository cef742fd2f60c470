// ABOUTME: Session token verification middleware for protected routes
// ABOUTME: Reads the token cookie or bearer header and inserts the decoded AuthUser
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token verification
//!
//! Each request is evaluated on its own: no token is rejected, a token that
//! fails signature, format or expiry checks is rejected, and only a verified
//! token reaches the handler with an [`AuthUser`] extension.

use crate::auth::AuthUser;
use crate::constants::{cookies::SESSION_COOKIE, messages};
use crate::context::ServerContext;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::security::cookies::get_cookie_value;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{header::AUTHORIZATION, HeaderMap};

/// Find the session token: cookie first, then `Authorization: Bearer`
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    get_cookie_value(headers, SESSION_COOKIE)
        .filter(|token| !token.is_empty())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(ToOwned::to_owned)
        })
}

/// Verify the presented token
///
/// `missing_message` is the client message when no token is present.
///
/// # Errors
///
/// `AUTH_REQUIRED` without a token; `AUTH_INVALID`, `AUTH_EXPIRED` or
/// `AUTH_MALFORMED` when verification fails
pub fn authenticate_headers(
    ctx: &ServerContext,
    headers: &HeaderMap,
    missing_message: &str,
) -> Result<AuthUser, AppError> {
    let token = extract_token(headers).ok_or_else(|| AppError::auth_required(missing_message))?;

    ctx.auth().auth_manager().authenticate(&token).map_err(|e| {
        AppLogger::log_security_event("token_rejected", "low", &e.to_string(), None);
        AppError::from(e)
    })
}

/// Middleware guarding routes that need a session
///
/// # Errors
///
/// Returns 401 when the token is missing or fails verification
pub async fn require_auth(
    State(ctx): State<ServerContext>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate_headers(&ctx, request.headers(), messages::NO_TOKEN)?;

    tracing::debug!(user_id = %auth_user.user_id, "Request authenticated");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_cookie_preferred_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("token=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_cleared_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(extract_token(&headers), None);
    }
}
