// ABOUTME: System-wide constants for the weather app backend
// ABOUTME: Defaults, cookie and header names, and client-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Constants Module
//!
//! Defaults used when the environment does not override them, plus the fixed
//! names and messages the front end depends on.

/// Service identification
pub mod service_names {
    /// Service name used in logs and as the token audience
    pub const WEATHERAPP_SERVER: &str = "weatherapp";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port expected by the front end
    pub const HTTP_PORT: u16 = 3000;

    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/weatherapp.db";

    /// Session lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 1;

    /// bcrypt work factor
    pub const BCRYPT_COST: u32 = 10;
}

/// Bounds enforced on configuration values
pub mod limits {
    /// Shortest acceptable HS256 signing secret, in bytes
    pub const MIN_JWT_SECRET_BYTES: usize = 32;

    /// Longest session lifetime accepted from configuration
    pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 7;

    /// bcrypt's own cost bounds
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Upper bound of the bcrypt cost parameter
    pub const MAX_BCRYPT_COST: u32 = 31;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Fallback HTTP port variable set by hosting platforms
    pub const PORT: &str = "PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Token signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Token lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// bcrypt work factor
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Node-style deployment environment alias
    pub const NODE_ENV: &str = "NODE_ENV";
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Session transport
pub mod cookies {
    /// Name of the session cookie
    pub const SESSION_COOKIE: &str = "token";
}

/// HTTP header names
pub mod headers {
    /// Request correlation header
    pub const REQUEST_ID: &str = "x-request-id";
}

/// Messages returned to clients
pub mod messages {
    /// No token presented on a protected route
    pub const NO_TOKEN: &str = "Unauthorized: No token provided";
    /// Token failed verification
    pub const INVALID_TOKEN: &str = "Unauthorized: Invalid token";
    /// Session check without a token
    pub const NOT_AUTHENTICATED: &str = "Not authenticated";
    /// Session check for a user that no longer exists
    pub const INVALID_USER: &str = "Invalid user";

    /// Login with an unknown username
    pub const USER_NOT_FOUND: &str = "user not found";
    /// Login with a wrong password
    pub const INVALID_PASSWORD: &str = "Invalid Password";

    /// Registration conflicts
    pub const USERNAME_EXISTS: &str = "Username already exists";
    /// Email already registered
    pub const EMAIL_EXISTS: &str = "Email already exists";

    /// Registration validation
    pub const REGISTER_FIELDS_REQUIRED: &str = "Username, password and email are required";
    /// Login validation
    pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required";
    /// Password reset validation
    pub const RESET_FIELDS_REQUIRED: &str = "Email, username, and new password are required";
    /// Password reset with a non-matching pair
    pub const INVALID_EMAIL_OR_USERNAME: &str = "Invalid email or username";
    /// Password longer than bcrypt can hash
    pub const PASSWORD_TOO_LONG: &str = "Password must be at most 71 bytes";
    /// Admin edit validation
    pub const EDIT_FIELDS_REQUIRED: &str = "Username and email are required";

    /// Admin-only route called by a regular user
    pub const ADMIN_REQUIRED: &str = "Unauthorized: Only admins can access this resource";

    /// Login success for administrators
    pub const LOGIN_SUCCESS_ADMIN: &str = "Login successful Admin";
    /// Login success for regular users
    pub const LOGIN_SUCCESS_USER: &str = "Login successful User";
    /// Logout success
    pub const LOGOUT_SUCCESS: &str = "Logout successful";
    /// Password reset success
    pub const PASSWORD_RESET_SUCCESS: &str = "Password reset successfully";
    /// Admin edit success
    pub const USER_UPDATED: &str = "User updated successfully";
    /// Admin delete success
    pub const USER_DELETED: &str = "User deleted successfully";
}
