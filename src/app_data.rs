use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{ServerSettings, connect_database, migrate_database};
use crate::errors::InternalError;
use crate::stores::ItemStore;

/// Everything the request handlers share, built once at startup
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<ServerSettings>,
    pub item_store: Arc<ItemStore>,
}

impl AppData {
    /// Connect to the database, ensure the schema, and build the stores
    ///
    /// # Returns
    /// * `Ok(AppData)` - Ready to serve requests
    /// * `Err(InternalError)` - The database is unreachable or the schema could not be created
    pub async fn init(settings: ServerSettings) -> Result<Self, InternalError> {
        let db = connect_database(settings.database_url()).await?;
        migrate_database(&db).await?;

        Ok(Self::new(db, settings))
    }

    /// Build from an already established pool
    pub fn new(db: DatabaseConnection, settings: ServerSettings) -> Self {
        let item_store = Arc::new(ItemStore::new(db.clone()));

        Self {
            db,
            settings: Arc::new(settings),
            item_store,
        }
    }
}
