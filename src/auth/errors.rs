//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Credential Errors
    // ==================

    /// User not found or wrong password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("A user with this email already exists")]
    EmailAlreadyExists,

    /// Email failed basic format validation
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Session Errors
    // ==================

    /// Session not found or expired
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// Refresh token is invalid or already used
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Session has been revoked
    #[error("Session has been revoked")]
    SessionRevoked,

    // ==================
    // Token Errors
    // ==================

    /// Bearer token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// Bearer token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Token signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// No bearer token presented
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Authenticated but not allowed to perform this operation
    #[error("Not authorized to perform this operation")]
    Forbidden,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    ///
    /// Duplicate registration is reported as a validation failure (400),
    /// matching the rest of the create/update validation surface.
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::EmailAlreadyExists => 400,
            AuthError::InvalidEmail(_) => 400,
            AuthError::WeakPassword(_) => 400,
            AuthError::MalformedToken => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::SessionInvalid => 401,
            AuthError::InvalidRefreshToken => 401,
            AuthError::SessionRevoked => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::AuthenticationRequired => 401,

            // 403 Forbidden
            AuthError::Forbidden => 403,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error is caused by the client
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
