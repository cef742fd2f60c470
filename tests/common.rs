// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory stores, a wired router and request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `weatherapp_server`

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Once};
use tower::ServiceExt;
use weatherapp_core::models::User;
use weatherapp_server::{
    auth::AuthManager,
    config::CorsConfig,
    context::{AuthContext, DataContext, ServerContext},
    crypto::PasswordHasher,
    database::{Database, UserStore},
    server::build_router,
};

/// Secret long enough to pass configuration validation
pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests-0123456789";

/// Lowest bcrypt cost, keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new("sqlite::memory:").await?))
}

/// Token manager sharing the secret used by [`create_test_context`]
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    Arc::new(AuthManager::new(TEST_JWT_SECRET.as_bytes(), 1))
}

/// Server context over the given store
pub fn create_test_context(database: Arc<Database>) -> ServerContext {
    let auth = AuthContext::new(
        create_test_auth_manager(),
        PasswordHasher::new(TEST_BCRYPT_COST),
        false,
    );
    ServerContext::new(auth, DataContext::new(database))
}

/// Full application router plus direct store access
pub async fn create_test_app() -> Result<(Router, Arc<Database>)> {
    let database = create_test_database().await?;
    let context = create_test_context(database.clone());
    Ok((build_router(context, &CorsConfig::default()), database))
}

/// Insert a user directly into the store
pub async fn create_test_user(
    database: &Database,
    username: &str,
    password: &str,
    is_admin: bool,
) -> Result<User> {
    let hash = PasswordHasher::new(TEST_BCRYPT_COST).hash(password)?;
    let user = User::new(
        username.to_owned(),
        format!("{username}@example.com"),
        hash,
        is_admin,
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// Build a JSON request, optionally carrying a session cookie
pub fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
    token: Option<&str>,
) -> Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }
    Ok(builder.body(Body::from(serde_json::to_vec(body)?))?)
}

/// Build a body-less request, optionally carrying a session cookie
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }
    Ok(builder.body(Body::empty())?)
}

/// Send a request through a clone of the router
pub async fn send(app: &Router, request: Request<Body>) -> Result<Response<Body>> {
    Ok(app.clone().oneshot(request).await?)
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// First `Set-Cookie` header value, if any
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Token value carried by a `Set-Cookie` header
pub fn session_token(response: &Response<Body>) -> Option<String> {
    set_cookie(response)?
        .split(';')
        .next()?
        .strip_prefix("token=")
        .map(ToOwned::to_owned)
}

/// Log in through the API and return the session token
pub async fn login(app: &Router, username: &str, password: &str) -> Result<String> {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/login",
            &serde_json::json!({ "username": username, "password": password }),
            None,
        )?,
    )
    .await?;
    session_token(&response).ok_or_else(|| anyhow::anyhow!("login did not set a session cookie"))
}
