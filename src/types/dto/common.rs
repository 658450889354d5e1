use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Human-readable status message
    pub message: String,

    /// Frontend origin the service was configured with, if any
    pub frontend_url: Option<String>,

    /// Externally reachable host address, if any
    pub public_host: Option<String>,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}
