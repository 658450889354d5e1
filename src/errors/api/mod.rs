// API-facing error types
pub mod items;

pub use items::{ItemApiError, ItemErrorResponse};
