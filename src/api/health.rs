use poem_openapi::{OpenApi, Tags, payload::Json};
use crate::types::dto::common::HealthResponse;
use chrono::Utc;

/// Health check API
pub struct HealthApi {
    frontend_url: Option<String>,
    public_host: Option<String>,
}

impl HealthApi {
    pub fn new(frontend_url: Option<String>, public_host: Option<String>) -> Self {
        Self {
            frontend_url,
            public_host,
        }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports that the service is up and echoes its origin configuration.
    /// Does not touch the database.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "OK".to_string(),
            message: "Backend is running".to_string(),
            frontend_url: self.frontend_url.clone(),
            public_host: self.public_host.clone(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
