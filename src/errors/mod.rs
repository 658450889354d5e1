// Error types: internal errors for stores, API errors for HTTP responses
pub mod api;
pub mod internal;

pub use api::ItemApiError;
pub use internal::{InternalError, ItemError};
