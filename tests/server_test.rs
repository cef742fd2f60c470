// ABOUTME: Integration tests for router assembly, health endpoints and request ids
// ABOUTME: Exercises the full middleware stack through tower oneshot calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_json, create_test_app, empty_request, send};
use std::collections::HashSet;

#[tokio::test]
async fn test_health_and_ready() -> Result<()> {
    let (app, _database) = create_test_app().await?;

    let response = send(&app, empty_request("GET", "/health", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let response = send(&app, empty_request("GET", "/ready", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["status"], "ready");
    Ok(())
}

#[tokio::test]
async fn test_request_ids_are_generated_and_unique() -> Result<()> {
    let (app, _database) = create_test_app().await?;

    let mut request_ids = HashSet::new();
    for _ in 0..5 {
        let response = send(&app, empty_request("GET", "/health", None)?).await?;
        let request_id = response
            .headers()
            .get("x-request-id")
            .expect("request id header")
            .to_str()?
            .to_owned();
        request_ids.insert(request_id);
    }

    assert_eq!(request_ids.len(), 5, "Request IDs should be unique");
    Ok(())
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() -> Result<()> {
    let (app, _database) = create_test_app().await?;

    let request = Request::builder()
        .uri("/api/check-auth")
        .header("x-request-id", "client-supplied-id")
        .body(Body::empty())?;
    let response = send(&app, request).await?;

    // Error responses carry the id too
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-supplied-id"
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<()> {
    let (app, _database) = create_test_app().await?;

    let response = send(&app, empty_request("GET", "/api/weather", None)?).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
