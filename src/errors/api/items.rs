use crate::errors::internal::{InternalError, ItemError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for item endpoints
#[derive(Object, Debug)]
pub struct ItemErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Item operation error types
#[derive(ApiResponse, Debug)]
pub enum ItemApiError {
    /// A required field is missing or empty
    #[oai(status = 400)]
    ValidationFailed(Json<ItemErrorResponse>),

    /// No item has the requested identifier
    #[oai(status = 404)]
    NotFound(Json<ItemErrorResponse>),

    /// The database could not complete the request
    #[oai(status = 500)]
    DatabaseError(Json<ItemErrorResponse>),
}

impl ItemApiError {
    /// Create a ValidationFailed error
    pub fn validation_failed() -> Self {
        ItemApiError::ValidationFailed(Json(ItemErrorResponse {
            error: "validation_failed".to_string(),
            message: "All fields are required".to_string(),
            status_code: 400,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        ItemApiError::NotFound(Json(ItemErrorResponse {
            error: "item_not_found".to_string(),
            message: "Item not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create a generic database error
    ///
    /// Never carries driver details; those are logged by `from_internal_error`.
    pub fn database_error() -> Self {
        ItemApiError::DatabaseError(Json(ItemErrorResponse {
            error: "database_error".to_string(),
            message: "Database error".to_string(),
            status_code: 500,
        }))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database { operation, .. } => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::database_error()
            }
            InternalError::Item(ItemError::NotFound(id)) => {
                tracing::debug!("Item {} not found", id);
                Self::not_found()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ItemApiError::ValidationFailed(json) => json.0.message.clone(),
            ItemApiError::NotFound(json) => json.0.message.clone(),
            ItemApiError::DatabaseError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            ItemApiError::ValidationFailed(json) => json.0.status_code,
            ItemApiError::NotFound(json) => json.0.status_code,
            ItemApiError::DatabaseError(json) => json.0.status_code,
        }
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_error() {
        let err = ItemApiError::validation_failed();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "All fields are required");
        assert!(matches!(err, ItemApiError::ValidationFailed(_)));
    }

    #[test]
    fn test_not_found_from_internal_error() {
        let err = ItemApiError::from_internal_error(ItemError::NotFound(3).into());

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Item not found");
    }

    #[test]
    fn test_database_error_hides_driver_details() {
        let internal = InternalError::database(
            "get_item",
            sea_orm::DbErr::Custom("connection refused on 10.0.0.5".to_string()),
        );

        let err = ItemApiError::from(internal);

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Database error");
        assert!(!err.to_string().contains("10.0.0.5"));
    }
}
