use crate::errors::InternalError;
use crate::errors::internal::ItemError;
use crate::types::db::item::{self, ActiveModel, Entity as Item};
use crate::types::internal::ItemFields;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

/// ItemStore owns all access to the items table
///
/// Every method runs one statement against the pool, except create and
/// update which read the row back after writing it.
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    /// Create a new ItemStore over an established connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all items, newest first
    ///
    /// Ties on created_at are broken by id so that items written within the
    /// same clock tick still come back in reverse insertion order.
    pub async fn list_items(&self) -> Result<Vec<item::Model>, InternalError> {
        Item::find()
            .order_by_desc(item::Column::CreatedAt)
            .order_by_desc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items", e))
    }

    /// Get a single item
    ///
    /// # Returns
    /// * `Ok(Model)` - The stored item
    /// * `Err(InternalError)` - ItemError::NotFound if no row matches, or a database error
    pub async fn get_item(&self, id: i32) -> Result<item::Model, InternalError> {
        Item::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_item", e))?
            .ok_or_else(|| ItemError::NotFound(id).into())
    }

    /// Insert a new item and read it back by its generated id
    pub async fn create_item(&self, fields: ItemFields) -> Result<item::Model, InternalError> {
        let new_item = ActiveModel {
            name: Set(fields.name),
            description: Set(fields.description),
            price: Set(fields.price),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = Item::insert(new_item)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("create_item", e))?;

        tracing::debug!("Created item {}", result.last_insert_id);

        self.get_item(result.last_insert_id).await
    }

    /// Overwrite all three fields of an existing item
    ///
    /// One UPDATE filtered by id, then a read-back. Partial updates are not
    /// supported.
    ///
    /// # Returns
    /// * `Ok(Model)` - The refreshed item
    /// * `Err(InternalError)` - ItemError::NotFound if no row matches, or a database error
    pub async fn update_item(
        &self,
        id: i32,
        fields: ItemFields,
    ) -> Result<item::Model, InternalError> {
        let result = Item::update_many()
            .col_expr(item::Column::Name, Expr::value(fields.name))
            .col_expr(item::Column::Description, Expr::value(fields.description))
            .col_expr(item::Column::Price, Expr::value(fields.price))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_item", e))?;

        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(id).into());
        }

        tracing::debug!("Updated item {}", id);

        self.get_item(id).await
    }

    /// Hard-delete an item
    pub async fn delete_item(&self, id: i32) -> Result<(), InternalError> {
        let result = Item::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(id).into());
        }

        tracing::debug!("Deleted item {}", id);

        Ok(())
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("db", &"<connection>")
            .finish()
    }
}
