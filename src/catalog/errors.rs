//! # Catalog Errors
//!
//! Error types for catalog (airport domain data) operations.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog validation and lookup errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A field failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unique constraint violated
    #[error("{0} already exists")]
    Duplicate(String),

    /// A referenced record does not exist
    #[error("Referenced {resource} does not exist: {id}")]
    UnknownReference { resource: &'static str, id: String },

    /// The record is referenced by other records and cannot be deleted
    #[error("{resource} is still referenced by {referenced_by}")]
    InUse {
        resource: &'static str,
        referenced_by: &'static str,
    },

    /// Record not found
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request: validation surface, including dangling
            // references on create/update
            CatalogError::Validation(_) => 400,
            CatalogError::Duplicate(_) => 400,
            CatalogError::UnknownReference { .. } => 400,
            CatalogError::InUse { .. } => 400,

            // 404 Not Found
            CatalogError::NotFound(_) => 404,

            // 500 Internal Server Error
            CatalogError::StorageError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::Validation("bad".to_string()).status_code(),
            400
        );
        assert_eq!(
            CatalogError::UnknownReference {
                resource: "route",
                id: "x".to_string()
            }
            .status_code(),
            400
        );
        assert_eq!(CatalogError::NotFound("flight").status_code(), 404);
        assert_eq!(
            CatalogError::StorageError("oops".to_string()).status_code(),
            500
        );
    }
}
