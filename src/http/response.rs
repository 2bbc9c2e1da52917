//! # API Response Types
//!
//! Shared error and listing envelopes for the HTTP handlers.

use axum::extract::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::auth::AuthError;
use crate::catalog::CatalogError;

/// Error tuple returned by every handler on failure
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

impl From<CatalogError> for ErrorResponse {
    fn from(err: CatalogError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

/// Map an auth failure to the handler error tuple
pub fn auth_error(err: AuthError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err)))
}

/// Map a catalog failure to the handler error tuple
pub fn catalog_error(err: CatalogError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err)))
}

/// Listing envelope: total match count plus the current page
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(count: usize, results: Vec<T>) -> Self {
        Self { count, results }
    }
}
