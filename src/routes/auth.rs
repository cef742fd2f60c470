// ABOUTME: Authentication route handlers and the service behind them
// ABOUTME: Registration, login with session cookie, logout, session check and password reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Request and response DTOs
pub mod types;

pub use types::{
    CheckAuthResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RegisterResponse,
};

use super::{json_body, map_user_conflict, present};
use crate::auth::AuthUser;
use crate::constants::messages;
use crate::context::{AuthContext, DataContext, ServerContext};
use crate::crypto::PasswordHasher;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::auth::authenticate_headers;
use crate::middleware::require_auth;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use weatherapp_core::models::User;

/// Outcome of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    /// Signed session token
    pub token: String,
    /// Response body
    pub response: LoginResponse,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    auth_context: AuthContext,
    data_context: DataContext,
}

impl AuthService {
    /// Create the service from its contexts
    #[must_use]
    pub const fn new(auth_context: AuthContext, data_context: DataContext) -> Self {
        Self {
            auth_context,
            data_context,
        }
    }

    /// Handle user registration
    ///
    /// # Errors
    /// 400 on a missing field, 409 on a taken username or email, 500 on
    /// hashing or store failure
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let (Some(username), Some(password), Some(email)) = (
            present(request.username),
            present(request.password),
            present(request.email),
        ) else {
            return Err(AppError::missing_field(messages::REGISTER_FIELDS_REQUIRED));
        };

        tracing::info!("User registration attempt for username: {}", username);
        let database = self.data_context.database();

        if database.get_user_by_username(&username).await?.is_some() {
            return Err(AppError::already_exists(messages::USERNAME_EXISTS));
        }
        if database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(messages::EMAIL_EXISTS));
        }

        let password_hash = self
            .auth_context
            .password_hasher()
            .hash_async(&password)
            .await?;

        let user = User::new(
            username,
            email,
            password_hash,
            request.is_admin.unwrap_or(false),
        );
        database
            .create_user(&user)
            .await
            .map_err(map_user_conflict)?;

        let token = self.auth_context.auth_manager().generate_token(&user)?;

        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);
        tracing::info!(
            "User registered successfully: {} ({})",
            user.username,
            user.id
        );

        Ok(RegisterResponse {
            user: user.info(),
            token,
        })
    }

    /// Handle user login
    ///
    /// # Errors
    /// 400 on a missing field, 401 for an unknown user or wrong password
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let (Some(username), Some(password)) =
            (present(request.username), present(request.password))
        else {
            return Err(AppError::missing_field(messages::LOGIN_FIELDS_REQUIRED));
        };

        tracing::info!("User login attempt for username: {}", username);

        let Some(user) = self
            .data_context
            .database()
            .get_user_by_username(&username)
            .await?
        else {
            AppLogger::log_auth_event("unknown", "login", false, Some("user not found"));
            return Err(AppError::auth_invalid(messages::USER_NOT_FOUND));
        };

        if !PasswordHasher::verify_async(&password, &user.password_hash).await? {
            AppLogger::log_auth_event(
                &user.id.to_string(),
                "login",
                false,
                Some("invalid password"),
            );
            return Err(AppError::auth_invalid(messages::INVALID_PASSWORD));
        }

        let token = self.auth_context.auth_manager().generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        let message = if user.is_admin {
            messages::LOGIN_SUCCESS_ADMIN
        } else {
            messages::LOGIN_SUCCESS_USER
        };

        Ok(LoginOutcome {
            token,
            response: LoginResponse {
                message: message.to_owned(),
                is_admin: user.is_admin,
            },
        })
    }

    /// Reset a password given a matching username and email pair
    ///
    /// # Errors
    /// 400 on a missing field or a non-matching pair
    pub async fn reset_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> AppResult<MessageResponse> {
        let (Some(email), Some(username), Some(new_password)) = (
            present(request.email),
            present(request.username),
            present(request.new_password),
        ) else {
            return Err(AppError::missing_field(messages::RESET_FIELDS_REQUIRED));
        };

        let database = self.data_context.database();
        let Some(user) = database
            .get_user_by_username_and_email(&username, &email)
            .await?
        else {
            AppLogger::log_security_event(
                "password_reset_mismatch",
                "low",
                "username and email do not match an account",
                None,
            );
            return Err(AppError::invalid_input(messages::INVALID_EMAIL_OR_USERNAME));
        };

        let password_hash = self
            .auth_context
            .password_hasher()
            .hash_async(&new_password)
            .await?;

        if !database.update_password(user.id, &password_hash).await? {
            return Err(AppError::invalid_input(messages::INVALID_EMAIL_OR_USERNAME));
        }

        AppLogger::log_auth_event(&user.id.to_string(), "password_reset", true, None);
        Ok(MessageResponse::new(messages::PASSWORD_RESET_SUCCESS))
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(context: ServerContext) -> Router {
        let protected = Router::new()
            .route("/logout", post(handle_logout))
            .route_layer(middleware::from_fn_with_state(
                context.clone(),
                require_auth,
            ));

        Router::new()
            .route("/register", post(handle_register))
            .route("/login", post(handle_login))
            .route("/forgot-password", post(handle_forgot_password))
            .route("/check-auth", get(handle_check_auth))
            .merge(protected)
            .with_state(context)
    }
}

fn service(ctx: &ServerContext) -> AuthService {
    AuthService::new(ctx.auth().clone(), ctx.data().clone())
}

async fn handle_register(
    State(ctx): State<ServerContext>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let response = service(&ctx).register(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_login(
    State(ctx): State<ServerContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let outcome = service(&ctx).login(json_body(payload)?).await?;

    let mut headers = HeaderMap::new();
    set_auth_cookie(
        &mut headers,
        &outcome.token,
        ctx.auth().session_max_age_secs(),
        ctx.auth().secure_cookies(),
    );

    Ok((headers, Json(outcome.response)))
}

async fn handle_logout(
    State(ctx): State<ServerContext>,
    Extension(auth): Extension<AuthUser>,
) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    clear_auth_cookie(&mut headers, ctx.auth().secure_cookies());

    AppLogger::log_auth_event(&auth.user_id.to_string(), "logout", true, None);
    (headers, Json(MessageResponse::new(messages::LOGOUT_SUCCESS)))
}

async fn handle_check_auth(
    State(ctx): State<ServerContext>,
    headers: HeaderMap,
) -> AppResult<Json<CheckAuthResponse>> {
    let auth = authenticate_headers(&ctx, &headers, messages::NOT_AUTHENTICATED)?;

    let user = ctx
        .data()
        .database()
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::auth_invalid(messages::INVALID_USER))?;

    Ok(Json(CheckAuthResponse { user: user.info() }))
}

async fn handle_forgot_password(
    State(ctx): State<ServerContext>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let response = service(&ctx).reset_password(json_body(payload)?).await?;
    Ok(Json(response))
}
