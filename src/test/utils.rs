// Test utilities shared across unit tests
// Only compiled when running tests

use sea_orm::{Database, DatabaseConnection};
use migration::{ItemsMigrator, MigratorTrait};
use crate::stores::ItemStore;
use std::sync::Arc;

/// Creates an in-memory database with the items schema and a store over it
///
/// Returns (db, item_store)
pub async fn setup_test_store() -> (DatabaseConnection, Arc<ItemStore>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    ItemsMigrator::up(&db, None)
        .await
        .expect("Failed to run items migrations");

    let item_store = Arc::new(ItemStore::new(db.clone()));

    (db, item_store)
}
