// ABOUTME: Structured error types for credential store operations
// ABOUTME: Converts sqlx failures into domain errors and maps them onto AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store-level errors.
//!
//! The credential store never hands raw `sqlx::Error` values to the
//! authentication layer. Uniqueness violations are surfaced separately because
//! they are a conflict the caller can act on, everything else is a generic
//! store failure.

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the credential store
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or reach the database
    #[error("database connection failed: {context}")]
    ConnectionError {
        /// What was being attempted
        context: String,
    },

    /// Schema migration failed at startup
    #[error("database migration failed: {context}")]
    MigrationError {
        /// Failing statement or table
        context: String,
    },

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {context}")]
    UniqueViolation {
        /// Constraint detail reported by the driver
        context: String,
    },

    /// A stored row could not be decoded into a model
    #[error("invalid stored data: {context}")]
    InvalidData {
        /// Column and reason
        context: String,
    },

    /// Any other query failure
    #[error("database query failed: {context}")]
    QueryError {
        /// Driver message
        context: String,
    },
}

impl DatabaseError {
    /// Whether this error came from a unique constraint
    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::UniqueViolation {
                    context: db_error.message().to_owned(),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => Self::InvalidData {
                context: error.to_string(),
            },
            _ => Self::QueryError {
                context: error.to_string(),
            },
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = if error.is_unique_violation() {
            ErrorCode::ResourceAlreadyExists
        } else {
            ErrorCode::DatabaseError
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let error = DatabaseError::UniqueViolation {
            context: "UNIQUE constraint failed: users.email".to_owned(),
        };
        let app_error = AppError::from(error);
        assert_eq!(app_error.code, ErrorCode::ResourceAlreadyExists);
        assert_eq!(app_error.http_status(), 409);
    }

    #[test]
    fn test_query_error_maps_to_generic_failure() {
        let app_error = AppError::from(DatabaseError::QueryError {
            context: "no such table: users".to_owned(),
        });
        assert_eq!(app_error.code, ErrorCode::DatabaseError);
        assert_eq!(app_error.public_message(), "Database operation failed");
    }

    #[test]
    fn test_pool_closed_is_connection_error() {
        let error = DatabaseError::from(sqlx::Error::PoolClosed);
        assert!(matches!(error, DatabaseError::ConnectionError { .. }));
    }
}
