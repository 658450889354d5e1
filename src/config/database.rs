use migration::{ItemsMigrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::errors::InternalError;

/// Open the connection pool and check that the database answers
///
/// Runs before the listener is bound: a failure here is a startup error.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    db.ping()
        .await
        .map_err(|e| InternalError::database("ping_database", e))?;

    tracing::info!("Connected to {:?} database", db.get_database_backend());

    Ok(db)
}

/// Ensure the items table exists
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    ItemsMigrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Items schema is up to date");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_database_is_a_connect_error() {
        let result = connect_database("sqlite:///nonexistent/dir/items.db?mode=ro").await;

        match result {
            Err(InternalError::Database { operation, .. }) => {
                assert_eq!(operation, "connect_database");
            }
            Err(other) => panic!("Expected database error, got: {}", other),
            Ok(_) => panic!("Expected connection to fail"),
        }
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = connect_database("sqlite::memory:").await.unwrap();

        migrate_database(&db).await.unwrap();
        migrate_database(&db).await.unwrap();
    }
}
