// ABOUTME: Admin user management route handlers
// ABOUTME: Handles user listing, identity edits and deletion behind the admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    constants::messages,
    context::ServerContext,
    errors::{AppError, AppResult},
    logging::AppLogger,
    middleware::require_admin,
    routes::{auth::MessageResponse, json_body, map_user_conflict, present},
};
use weatherapp_core::models::User;

use super::types::{UpdateUserRequest, UserListResponse};

/// Unknown or unparseable ids both mean there is no such user
fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("User"))
}

/// Handle user listing
pub(super) async fn handle_list_users(
    State(ctx): State<ServerContext>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<UserListResponse>> {
    require_admin(&auth)?;

    let users = ctx.data().database().list_users().await?;
    info!("Admin {} listed {} users", auth.user_id, users.len());

    Ok(Json(UserListResponse {
        users: users.iter().map(User::info).collect(),
    }))
}

/// Handle username/email edit
pub(super) async fn handle_update_user(
    State(ctx): State<ServerContext>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&auth)?;
    let user_id = parse_user_id(&user_id)?;

    let request = json_body(payload)?;
    let (Some(username), Some(email)) = (present(request.username), present(request.email))
    else {
        return Err(AppError::missing_field(messages::EDIT_FIELDS_REQUIRED));
    };

    let database = ctx.data().database();
    if database.get_user(user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }
    if let Some(other) = database.get_user_by_username(&username).await? {
        if other.id != user_id {
            return Err(AppError::already_exists(messages::USERNAME_EXISTS));
        }
    }
    if let Some(other) = database.get_user_by_email(&email).await? {
        if other.id != user_id {
            return Err(AppError::already_exists(messages::EMAIL_EXISTS));
        }
    }

    let updated = database
        .update_user_identity(user_id, &username, &email)
        .await
        .map_err(map_user_conflict)?;
    if !updated {
        return Err(AppError::not_found("User"));
    }

    AppLogger::log_admin_action(&auth.user_id.to_string(), "update_user", &user_id.to_string());
    Ok(Json(MessageResponse::new(messages::USER_UPDATED)))
}

/// Handle user deletion
pub(super) async fn handle_delete_user(
    State(ctx): State<ServerContext>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&auth)?;
    let user_id = parse_user_id(&user_id)?;

    if !ctx.data().database().delete_user(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    AppLogger::log_admin_action(&auth.user_id.to_string(), "delete_user", &user_id.to_string());
    Ok(Json(MessageResponse::new(messages::USER_DELETED)))
}
