//! # User & Token Routes
//!
//! Registration, token issuance/refresh, logout, and the authenticated
//! profile endpoint.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::{CredentialsRequest, RegisterRequest, TokenResponse, UpdateProfileRequest, User};
use crate::http::response::{auth_error, ApiError};
use crate::http::state::ApiState;

/// User routes, mounted under `/api/user`
pub fn user_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/create", post(create_user_handler))
        .route("/create/", post(create_user_handler))
        .route("/me", get(get_profile_handler).patch(update_profile_handler))
        .route("/me/", get(get_profile_handler).patch(update_profile_handler))
        .with_state(state)
}

/// Token routes, mounted under `/api/token`
pub fn token_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/token", post(issue_token_handler))
        .route("/token/", post(issue_token_handler))
        .route("/token/refresh", post(refresh_token_handler))
        .route("/token/refresh/", post(refresh_token_handler))
        .route("/token/logout", post(logout_handler))
        .route("/token/logout/", post(logout_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub is_superuser: bool,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            is_superuser: user.is_superuser,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Register a new account
async fn create_user_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.auth.register(request).map_err(auth_error)?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Exchange credentials for an access/refresh token pair
async fn issue_token_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (_, tokens) = state.auth.issue_token(request).map_err(auth_error)?;
    Ok(Json(tokens))
}

/// Rotate a refresh token into a fresh pair
async fn refresh_token_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state
        .auth
        .refresh(&request.refresh_token)
        .map_err(auth_error)?;
    Ok(Json(tokens))
}

/// Revoke a refresh token
async fn logout_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<LogoutRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .auth
        .logout(&request.refresh_token)
        .map_err(auth_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current user's profile
async fn get_profile_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let ctx = state.authorize(&headers)?;
    let user = state.auth.get_user(ctx.user_id).map_err(auth_error)?;
    Ok(Json(UserResponse::from(&user)))
}

/// Patch the current user's email and/or password
async fn update_profile_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let ctx = state.authorize(&headers)?;
    let user = state
        .auth
        .update_profile(ctx.user_id, request)
        .map_err(auth_error)?;
    Ok(Json(UserResponse::from(&user)))
}
