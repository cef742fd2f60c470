// ABOUTME: Integration tests for the SQLite credential store
// ABOUTME: Covers user creation, lookups, uniqueness, updates and file-backed persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_database, create_test_user};
use uuid::Uuid;
use weatherapp_core::errors::database::DatabaseError;
use weatherapp_core::models::User;
use weatherapp_server::database::{Database, UserStore};

#[tokio::test]
async fn test_create_and_lookup_user() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database, "alice", "pw1", false).await?;

    let by_id = database.get_user(user.id).await?.unwrap();
    assert_eq!(by_id.username, "alice");
    assert_eq!(by_id.email, "alice@example.com");
    assert!(!by_id.is_admin);
    assert_eq!(by_id.password_hash, user.password_hash);

    assert!(database.get_user_by_username("alice").await?.is_some());
    assert!(database
        .get_user_by_email("alice@example.com")
        .await?
        .is_some());
    assert!(database.get_user_by_username("ALICE").await?.is_none());
    assert!(database.get_user(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_lookup_by_username_and_email_requires_both() -> Result<()> {
    let database = create_test_database().await?;
    create_test_user(&database, "alice", "pw1", false).await?;
    create_test_user(&database, "bob", "pw2", false).await?;

    assert!(database
        .get_user_by_username_and_email("alice", "alice@example.com")
        .await?
        .is_some());
    assert!(database
        .get_user_by_username_and_email("alice", "bob@example.com")
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_unique_constraints() -> Result<()> {
    let database = create_test_database().await?;
    create_test_user(&database, "alice", "pw1", false).await?;

    let same_name = User::new("alice".into(), "other@x.io".into(), "hash".into(), false);
    let err = database.create_user(&same_name).await.unwrap_err();
    assert!(err.is_unique_violation());
    assert!(matches!(err, DatabaseError::UniqueViolation { ref context } if context.contains("users.username")));

    let same_email = User::new("bob".into(), "alice@example.com".into(), "hash".into(), false);
    let err = database.create_user(&same_email).await.unwrap_err();
    assert!(matches!(err, DatabaseError::UniqueViolation { ref context } if context.contains("users.email")));

    assert_eq!(database.get_user_count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_updates_report_missing_rows() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database, "alice", "pw1", false).await?;
    let ghost = Uuid::new_v4();

    assert!(database.update_password(user.id, "new-hash").await?);
    assert!(!database.update_password(ghost, "new-hash").await?);
    assert_eq!(
        database.get_user(user.id).await?.unwrap().password_hash,
        "new-hash"
    );

    assert!(database.set_admin(user.id, true).await?);
    assert!(database.get_user(user.id).await?.unwrap().is_admin);
    assert!(!database.set_admin(ghost, true).await?);

    assert!(
        database
            .update_user_identity(user.id, "alice2", "a2@x.io")
            .await?
    );
    assert!(!database.update_user_identity(ghost, "x", "y").await?);

    assert!(database.delete_user(user.id).await?);
    assert!(!database.delete_user(user.id).await?);
    assert_eq!(database.get_user_count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_list_users_in_creation_order() -> Result<()> {
    let database = create_test_database().await?;
    for name in ["carol", "alice", "bob"] {
        create_test_user(&database, name, "pw", false).await?;
    }

    let names: Vec<String> = database
        .list_users()
        .await?
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "carol");
    database.ping().await?;
    Ok(())
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("users.db");
    let url = format!("sqlite:{}", path.display());

    {
        let database = Database::new(&url).await?;
        create_test_user(&database, "alice", "pw1", true).await?;
    }

    let reopened = Database::new(&url).await?;
    let user = reopened.get_user_by_username("alice").await?.unwrap();
    assert!(user.is_admin);
    assert!(path.exists());
    Ok(())
}
