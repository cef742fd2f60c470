// ABOUTME: Integration tests for admin user management routes
// ABOUTME: Validates the admin guard, listing, identity edits and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{
    body_json, create_test_app, create_test_user, empty_request, json_request, login, send,
};
use serde_json::json;
use uuid::Uuid;
use weatherapp_server::database::UserStore;

#[tokio::test]
async fn test_admin_lists_users_without_hashes() -> Result<()> {
    let (app, database) = create_test_app().await?;
    create_test_user(&database, "root", "admin-pw", true).await?;
    create_test_user(&database, "alice", "pw1", false).await?;
    let token = login(&app, "root", "admin-pw").await?;

    let response = send(&app, empty_request("GET", "/api/users", Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }
    assert!(users.iter().any(|u| u["username"] == "alice"));
    Ok(())
}

#[tokio::test]
async fn test_non_admin_is_forbidden() -> Result<()> {
    let (app, database) = create_test_app().await?;
    let alice = create_test_user(&database, "alice", "pw1", false).await?;
    let token = login(&app, "alice", "pw1").await?;

    let response = send(&app, empty_request("GET", "/api/users", Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await?["error"],
        "Unauthorized: Only admins can access this resource"
    );

    let uri = format!("/api/users/{}", alice.id);
    let response = send(&app, empty_request("DELETE", &uri, Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(database.get_user(alice.id).await?.is_some());

    let response = send(
        &app,
        json_request(
            "PUT",
            &uri,
            &json!({ "username": "mallory", "email": "m@x.io" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_admin_routes_require_token() -> Result<()> {
    let (app, _database) = create_test_app().await?;

    let response = send(&app, empty_request("GET", "/api/users", None)?).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await?["code"], "AUTH_REQUIRED");
    Ok(())
}

#[tokio::test]
async fn test_admin_updates_user_identity() -> Result<()> {
    let (app, database) = create_test_app().await?;
    create_test_user(&database, "root", "admin-pw", true).await?;
    let alice = create_test_user(&database, "alice", "pw1", false).await?;
    let token = login(&app, "root", "admin-pw").await?;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{}", alice.id),
            &json!({ "username": "alice2", "email": "alice2@x.io" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["message"], "User updated successfully");

    let stored = database.get_user(alice.id).await?.unwrap();
    assert_eq!(stored.username, "alice2");
    assert_eq!(stored.email, "alice2@x.io");
    assert_eq!(stored.password_hash, alice.password_hash);
    Ok(())
}

#[tokio::test]
async fn test_admin_update_conflicts_and_missing() -> Result<()> {
    let (app, database) = create_test_app().await?;
    create_test_user(&database, "root", "admin-pw", true).await?;
    let alice = create_test_user(&database, "alice", "pw1", false).await?;
    create_test_user(&database, "bob", "pw2", false).await?;
    let token = login(&app, "root", "admin-pw").await?;
    let uri = format!("/api/users/{}", alice.id);

    let response = send(
        &app,
        json_request(
            "PUT",
            &uri,
            &json!({ "username": "bob", "email": "alice@example.com" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        json_request(
            "PUT",
            &uri,
            &json!({ "username": "alice", "email": "bob@example.com" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Keeping your own username is not a conflict
    let response = send(
        &app,
        json_request(
            "PUT",
            &uri,
            &json!({ "username": "alice", "email": "new@example.com" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        json_request("PUT", &uri, &json!({ "username": "alice" }), Some(&token))?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{}", Uuid::new_v4()),
            &json!({ "username": "ghost", "email": "ghost@x.io" }),
            Some(&token),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_admin_deletes_user() -> Result<()> {
    let (app, database) = create_test_app().await?;
    create_test_user(&database, "root", "admin-pw", true).await?;
    let alice = create_test_user(&database, "alice", "pw1", false).await?;
    let token = login(&app, "root", "admin-pw").await?;
    let uri = format!("/api/users/{}", alice.id);

    let response = send(&app, empty_request("DELETE", &uri, Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["message"], "User deleted successfully");
    assert!(database.get_user(alice.id).await?.is_none());

    let response = send(&app, empty_request("DELETE", &uri, Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        empty_request("DELETE", "/api/users/not-a-uuid", Some(&token))?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
