// Common test utilities for integration tests
#![allow(dead_code)]

use item_store::api::build_app;
use item_store::app_data::AppData;
use item_store::config::{EnvironmentProvider, ServerSettings};
use migration::{ItemsMigrator, MigratorTrait};
use poem::{Endpoint, test::TestClient};
use sea_orm::{Database, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed set of environment variables, isolated from the process environment
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates an in-memory items database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    ItemsMigrator::up(&db, None)
        .await
        .expect("Failed to run items migrations");

    db
}

/// Server settings built from the given variables
pub fn test_settings(vars: &[(&str, &str)]) -> ServerSettings {
    let mut all_vars = vec![("DATABASE_URL", "sqlite::memory:")];
    all_vars.extend_from_slice(vars);

    ServerSettings::from_env_provider(Arc::new(TestEnvironment::new(&all_vars)))
        .expect("Failed to load test settings")
}

/// Full application over a fresh database, with default settings
pub async fn setup_test_app() -> TestClient<impl Endpoint> {
    setup_test_app_with(&[]).await
}

/// Full application over a fresh database, with extra settings variables
pub async fn setup_test_app_with(vars: &[(&str, &str)]) -> TestClient<impl Endpoint> {
    let db = setup_test_db().await;
    let app_data = AppData::new(db, test_settings(vars));

    TestClient::new(build_app(&app_data))
}
