// API layer - HTTP endpoints
pub mod health;
pub mod items;

use std::sync::Arc;

use poem::{Endpoint, EndpointExt, Route, middleware::Tracing};
use poem_openapi::OpenApiService;

pub use health::HealthApi;
pub use items::ItemsApi;

use crate::app_data::AppData;

/// Compose the API under `/api` and Swagger UI under `/swagger`
///
/// The CORS policy wraps every route. Rejected origins are logged before
/// the CORS middleware answers them.
pub fn build_app(app_data: &AppData) -> impl Endpoint + use<> {
    let settings = &app_data.settings;

    let health_api = HealthApi::new(
        settings.frontend_url().map(str::to_string),
        settings.public_host().map(str::to_string),
    );
    let items_api = ItemsApi::new(app_data.item_store.clone());

    let api_service = OpenApiService::new(
        (health_api, items_api),
        "Item Store API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://localhost:{}/api", settings.server_port()));
    let ui = api_service.swagger_ui();

    let cors_policy = Arc::new(settings.cors_policy());
    let cors = cors_policy.middleware();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(cors)
        .around(move |ep, req| {
            let cors_policy = cors_policy.clone();
            async move {
                if let Some(origin) = req.header("Origin") {
                    if !cors_policy.is_allowed(Some(origin)) {
                        tracing::warn!("Blocked by CORS: {}", origin);
                    }
                }
                ep.call(req).await
            }
        })
        .with(Tracing)
}
