//! # Shared API State
//!
//! One state object for every router: the auth service and the catalog
//! store. Handlers authorize requests through it before touching records.

use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};

use crate::auth::user::{InMemoryUserRepository, User};
use crate::auth::{
    AuthContext, AuthService, JwtConfig, PasswordPolicy, SessionConfig,
};
use crate::auth::session::InMemorySessionRepository;
use crate::catalog::CatalogStore;
use crate::http::response::{auth_error, ApiError, ErrorResponse};

/// Email of the administrator created at startup
pub const SEED_SUPERUSER_EMAIL: &str = "aboba@gmail.com";

/// Password of the administrator created at startup
pub const SEED_SUPERUSER_PASSWORD: &str = "aboba";

/// Shared state for all API routers
pub struct ApiState {
    pub auth: AuthService<InMemoryUserRepository, InMemorySessionRepository>,
    pub catalog: CatalogStore,
}

impl ApiState {
    /// Create state with default config (development secret)
    pub fn new() -> Self {
        Self::with_jwt_config(JwtConfig::default())
    }

    /// Create state signing tokens with the given JWT config
    pub fn with_jwt_config(jwt_config: JwtConfig) -> Self {
        Self {
            auth: AuthService::new(
                InMemoryUserRepository::new(),
                InMemorySessionRepository::new(),
                jwt_config,
                SessionConfig::default(),
                PasswordPolicy::default(),
            ),
            catalog: CatalogStore::new(),
        }
    }

    /// Ensure the bootstrap administrator exists. Returns the user if it
    /// was created by this call.
    pub fn seed_superuser(&self) -> Option<User> {
        self.auth
            .seed_superuser(SEED_SUPERUSER_EMAIL, SEED_SUPERUSER_PASSWORD)
            .ok()
            .flatten()
    }

    /// Authorize a request from its `Authorization: Bearer` header
    pub fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, ApiError> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "));

        let token = match token {
            Some(t) => t,
            None => {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Missing authorization header", 401)),
                ))
            }
        };

        self.auth.authorize(token).map_err(auth_error)
    }

    /// Authorize a request and require the superuser flag
    pub fn authorize_superuser(&self, headers: &HeaderMap) -> Result<AuthContext, ApiError> {
        let ctx = self.authorize(headers)?;
        ctx.require_superuser().map_err(auth_error)?;
        Ok(ctx)
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}
