use thiserror::Error;

/// Internal error type for store operations
///
/// Separates infrastructure errors (Database) from domain errors (Item).
/// This type is NOT exposed via API. Endpoints convert it with
/// `ItemApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Item store errors
    #[error(transparent)]
    Item(#[from] ItemError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Item(ItemError::NotFound(_)))
    }
}

/// Item store specific errors
#[derive(Error, Debug)]
pub enum ItemError {
    /// No row matches the identifier
    #[error("Item not found: {0}")]
    NotFound(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display_includes_operation() {
        let err = InternalError::database("list_items", sea_orm::DbErr::Custom("boom".to_string()));

        let display = err.to_string();
        assert!(display.contains("list_items"));
        assert!(display.contains("boom"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_item_error_converts_transparently() {
        let err: InternalError = ItemError::NotFound(42).into();

        assert_eq!(err.to_string(), "Item not found: 42");
        assert!(err.is_not_found());
    }
}
