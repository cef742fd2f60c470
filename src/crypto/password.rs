// ABOUTME: Salted bcrypt password hashing with a configurable work factor
// ABOUTME: Async variants run the CPU-heavy work on the blocking thread pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::constants::messages;
use crate::errors::AppError;
use bcrypt::BcryptError;

/// bcrypt password hasher
///
/// Every hash gets a fresh random salt, so hashing the same password twice
/// yields different strings that both verify. bcrypt only reads the first 72
/// bytes (terminator included), so longer passwords are refused instead of
/// being silently truncated.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` if the password is too long for bcrypt, an internal
    /// error if bcrypt rejects the cost
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::non_truncating_hash(password, self.cost).map_err(|e| match e {
            BcryptError::Truncation(_) => {
                AppError::invalid_input(messages::PASSWORD_TOO_LONG).with_source(e)
            }
            e => {
                tracing::error!("Password hashing failed: {}", e);
                AppError::internal("Password hashing failed").with_source(e)
            }
        })
    }

    /// Check a plaintext attempt against a stored hash
    ///
    /// A mismatch is `Ok(false)`, and so is an attempt too long to have been
    /// hashed. An unparseable stored hash is an error.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the stored hash is not a valid bcrypt hash
    pub fn verify(password: &str, hash: &str) -> Result<bool, AppError> {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => {
                tracing::error!("Password verification failed: {}", e);
                Err(AppError::internal("Password verification error").with_source(e))
            }
        }
    }

    /// Hash on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an internal error if hashing fails or the task panics
    pub async fn hash_async(&self, password: &str) -> Result<String, AppError> {
        let hasher = *self;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    /// Verify on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an internal error if verification fails or the task panics
    pub async fn verify_async(password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hash = hasher.hash("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(PasswordHasher::verify("correct horse", &hash).unwrap());
        assert!(!PasswordHasher::verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(TEST_COST);
        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        assert_ne!(first, second);
        assert!(PasswordHasher::verify("same password", &first).unwrap());
        assert!(PasswordHasher::verify("same password", &second).unwrap());
    }

    #[test]
    fn test_invalid_stored_hash_is_error() {
        assert!(PasswordHasher::verify("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_is_error() {
        assert!(PasswordHasher::new(2).hash("pw").is_err());
    }

    #[test]
    fn test_passwords_sharing_a_long_prefix_stay_distinct() {
        let hasher = PasswordHasher::new(TEST_COST);
        let prefix = "A".repeat(70);
        let hash = hasher.hash(&format!("{prefix}x")).unwrap();

        assert!(PasswordHasher::verify(&format!("{prefix}x"), &hash).unwrap());
        assert!(!PasswordHasher::verify(&format!("{prefix}y"), &hash).unwrap());
        assert!(!PasswordHasher::verify(&format!("{prefix}x-and-more"), &hash).unwrap());
    }

    #[test]
    fn test_overlong_password_is_invalid_input() {
        let hasher = PasswordHasher::new(TEST_COST);
        let err = hasher.hash(&"A".repeat(72)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.http_status(), 400);

        assert!(hasher.hash(&"A".repeat(71)).is_ok());
    }

    #[tokio::test]
    async fn test_async_variants() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hash = hasher.hash_async("async pw").await.unwrap();
        assert!(PasswordHasher::verify_async("async pw", &hash).await.unwrap());
        assert!(!PasswordHasher::verify_async("wrong", &hash).await.unwrap());
    }
}
