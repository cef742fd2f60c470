// ABOUTME: JWT session token issuance and verification
// ABOUTME: Signs HS256 tokens carrying user id and admin flag, and validates them with detailed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Session Tokens
//!
//! Sessions are stateless: the token itself carries the user id, the admin flag
//! and the expiry. Nothing is stored server-side, so a token stays valid until it
//! expires or the signing secret changes.

use crate::constants::{messages, service_names};
use crate::errors::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use weatherapp_core::models::User;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

fn expired_ago(expired_at: &DateTime<Utc>, current_time: &DateTime<Utc>) -> String {
    format!(
        "{} ago at {}",
        humanize_duration(*current_time - *expired_at),
        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired {}", expired_ago(.expired_at, .current_time))]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    #[error("JWT token is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        let app_error = match &error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(messages::INVALID_TOKEN),
            JwtValidationError::TokenInvalid { .. } => Self::auth_invalid(messages::INVALID_TOKEN),
            JwtValidationError::TokenMalformed { .. } => {
                Self::auth_malformed(messages::INVALID_TOKEN)
            }
        };
        app_error.with_source(error)
    }
}

/// `JWT` claims for a user session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Admin flag at the time of issuance
    pub is_admin: bool,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Identity decoded from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Admin flag carried by the token
    pub is_admin: bool,
}

impl TryFrom<Claims> for AuthUser {
    type Error = JwtValidationError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|e| JwtValidationError::TokenMalformed {
                details: format!("subject is not a user id: {e}"),
            })?;
        Ok(Self {
            user_id,
            is_admin: claims.is_admin,
        })
    }
}

/// Issues and verifies session tokens
///
/// Holds only immutable key material, so it is shared behind an `Arc` without
/// locking.
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the HS256 secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Configured token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        self.generate_token_at(user.id, user.is_admin, Utc::now())
    }

    /// Generate a session token as if issued at `issued_at`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token_at(
        &self,
        user_id: Uuid,
        is_admin: bool,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expiry = issued_at + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            is_admin,
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            aud: service_names::WEATHERAPP_SERVER.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AppError::internal("Failed to generate session token").with_source(e)
        })
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if:
    /// - Token signature is invalid
    /// - Token has expired
    /// - Token is malformed or not valid JWT format
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::validate_claims_expiry(&claims, Utc::now())?;

        tracing::debug!("JWT token validation successful for user: {}", claims.sub);
        Ok(claims)
    }

    /// Validate a token and return the identity it carries
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if validation fails or the subject is not a user id
    pub fn authenticate(&self, token: &str) -> Result<AuthUser, JwtValidationError> {
        AuthUser::try_from(self.validate_token_detailed(token)?)
    }

    /// Decode token claims without expiration validation
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation_no_exp = Validation::new(Algorithm::HS256);
        validation_no_exp.validate_exp = false;
        validation_no_exp.set_audience(&[service_names::WEATHERAPP_SERVER]);
        validation_no_exp.set_required_spec_claims(&["exp", "sub", "aud"]);

        decode::<Claims>(token, &self.decoding_key, &validation_no_exp)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Reject tokens whose expiry has passed, with no leeway
    fn validate_claims_expiry(
        claims: &Claims,
        current_time: DateTime<Utc>,
    ) -> Result<(), JwtValidationError> {
        if current_time.timestamp() >= claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::warn!(
                "JWT token expired for user: {} - Expired {} ago at {}",
                claims.sub,
                humanize_duration(current_time - expired_at),
                expired_at.to_rfc3339()
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }
        Ok(())
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience mismatch".into(),
            },
            ErrorKind::InvalidAlgorithm => JwtValidationError::TokenInvalid {
                reason: "Token algorithm not accepted".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}
