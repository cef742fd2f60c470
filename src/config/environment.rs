// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HTTP, database, token and CORS settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration

use crate::constants::{defaults, env_vars, limits};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment; cookies are marked `Secure`
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a connection string
    ///
    /// Anything without a recognized scheme is treated as a `SQLite` file path.
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("{} must not be empty", env_vars::DATABASE_URL));
        }
        if trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://") {
            return Err(anyhow!("only SQLite databases are supported, got {trimmed}"));
        }

        let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                defaults::DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(defaults::DATABASE_URL),
            ),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Token and password hashing settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Validate secret length, expiry horizon and bcrypt cost
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < limits::MIN_JWT_SECRET_BYTES {
            return Err(anyhow!(
                "{} must be at least {} bytes long",
                env_vars::JWT_SECRET,
                limits::MIN_JWT_SECRET_BYTES
            ));
        }
        if !(1..=limits::MAX_JWT_EXPIRY_HOURS).contains(&self.jwt_expiry_hours) {
            return Err(anyhow!(
                "{} must be between 1 and {}",
                env_vars::JWT_EXPIRY_HOURS,
                limits::MAX_JWT_EXPIRY_HOURS
            ));
        }
        if !(limits::MIN_BCRYPT_COST..=limits::MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(anyhow!(
                "{} must be between {} and {}",
                env_vars::BCRYPT_COST,
                limits::MIN_BCRYPT_COST,
                limits::MAX_BCRYPT_COST
            ));
        }
        Ok(())
    }

    /// Session lifetime in seconds, used as the cookie `Max-Age`
    #[must_use]
    pub const fn session_max_age_secs(&self) -> i64 {
        self.jwt_expiry_hours * 3600
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Token and hashing settings
    pub auth: AuthConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let http_port = match env::var(env_vars::HTTP_PORT).or_else(|_| env::var(env_vars::PORT))
        {
            Ok(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {value}", env_vars::HTTP_PORT))?,
            Err(_) => defaults::HTTP_PORT,
        };

        let database_url = DatabaseUrl::parse_url(&env_var_or(
            env_vars::DATABASE_URL,
            defaults::DATABASE_URL,
        ))?;

        let jwt_secret = env::var(env_vars::JWT_SECRET)
            .with_context(|| format!("{} environment variable is required", env_vars::JWT_SECRET))?;

        let auth = AuthConfig {
            jwt_secret,
            jwt_expiry_hours: env_var_or(
                env_vars::JWT_EXPIRY_HOURS,
                &defaults::JWT_EXPIRY_HOURS.to_string(),
            )
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value", env_vars::JWT_EXPIRY_HOURS))?,
            bcrypt_cost: env_var_or(env_vars::BCRYPT_COST, &defaults::BCRYPT_COST.to_string())
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value", env_vars::BCRYPT_COST))?,
        };

        let environment = env::var(env_vars::ENVIRONMENT)
            .or_else(|_| env::var(env_vars::NODE_ENV))
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let cors = CorsConfig {
            allowed_origins: parse_origins(&env_var_or(env_vars::CORS_ALLOWED_ORIGINS, "*")),
        };

        let config = Self {
            http_port,
            database_url,
            auth,
            environment,
            cors,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;

        if self.environment.is_production() && self.database_url.is_memory() {
            warn!("Production environment is running on an in-memory database");
        }
        if self.environment.is_production() && self.cors.allowed_origins.iter().any(|o| o == "*")
        {
            warn!("Production environment allows any CORS origin");
        }

        Ok(())
    }

    /// Whether session cookies carry the `Secure` attribute
    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Weather App Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Token Expiry: {}h\n\
             - bcrypt Cost: {}\n\
             - Secure Cookies: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.database_url,
            self.auth.jwt_expiry_hours,
            self.auth.bcrypt_cost,
            self.secure_cookies(),
            self.cors.allowed_origins.join(", "),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
