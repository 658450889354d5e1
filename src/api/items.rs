use poem_openapi::{ApiResponse, OpenApi, Tags, param::Path, payload::Json};
use crate::errors::ItemApiError;
use crate::stores::ItemStore;
use crate::types::dto::items::{DeleteItemResponse, Item, ItemRequest};
use std::sync::Arc;

/// Items API
pub struct ItemsApi {
    item_store: Arc<ItemStore>,
}

impl ItemsApi {
    /// Create a new ItemsApi over the given ItemStore
    pub fn new(item_store: Arc<ItemStore>) -> Self {
        Self { item_store }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ApiTags {
    /// Item management endpoints
    Items,
}

/// Successful create response
#[derive(ApiResponse, Debug)]
pub enum CreateItemResponse {
    /// The item was stored
    #[oai(status = 201)]
    Created(Json<Item>),
}

/// Ids beyond the column's range cannot match any row
fn item_id(id: i64) -> Result<i32, ItemApiError> {
    i32::try_from(id).map_err(|_| ItemApiError::not_found())
}

#[OpenApi]
impl ItemsApi {
    /// List all items, newest first
    #[oai(path = "/items", method = "get", tag = "ApiTags::Items")]
    async fn list_items(&self) -> Result<Json<Vec<Item>>, ItemApiError> {
        let items = self.item_store.list_items().await?;

        Ok(Json(items.into_iter().map(Item::from).collect()))
    }

    /// Get a single item
    #[oai(path = "/items/:id", method = "get", tag = "ApiTags::Items")]
    async fn get_item(&self, id: Path<i64>) -> Result<Json<Item>, ItemApiError> {
        let item = self.item_store.get_item(item_id(id.0)?).await?;

        Ok(Json(item.into()))
    }

    /// Create a new item
    ///
    /// All three fields are required. Returns the stored item with its
    /// generated id and creation timestamp.
    #[oai(path = "/items", method = "post", tag = "ApiTags::Items")]
    async fn create_item(
        &self,
        body: Json<ItemRequest>,
    ) -> Result<CreateItemResponse, ItemApiError> {
        let fields = body.0.into_fields().ok_or_else(|| {
            tracing::debug!("Rejected item create with missing fields");
            ItemApiError::validation_failed()
        })?;

        let item = self.item_store.create_item(fields).await?;

        Ok(CreateItemResponse::Created(Json(item.into())))
    }

    /// Replace all fields of an existing item
    #[oai(path = "/items/:id", method = "put", tag = "ApiTags::Items")]
    async fn update_item(
        &self,
        id: Path<i64>,
        body: Json<ItemRequest>,
    ) -> Result<Json<Item>, ItemApiError> {
        let fields = body.0.into_fields().ok_or_else(|| {
            tracing::debug!("Rejected update of item {} with missing fields", id.0);
            ItemApiError::validation_failed()
        })?;

        let item = self.item_store.update_item(item_id(id.0)?, fields).await?;

        Ok(Json(item.into()))
    }

    /// Delete an item
    #[oai(path = "/items/:id", method = "delete", tag = "ApiTags::Items")]
    async fn delete_item(&self, id: Path<i64>) -> Result<Json<DeleteItemResponse>, ItemApiError> {
        self.item_store.delete_item(item_id(id.0)?).await?;

        Ok(Json(DeleteItemResponse {
            message: "Item deleted successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_store;
    use sea_orm::{ConnectionTrait, Statement};

    async fn setup_test_api() -> (sea_orm::DatabaseConnection, ItemsApi) {
        let (db, item_store) = setup_test_store().await;
        (db, ItemsApi::new(item_store))
    }

    async fn create(api: &ItemsApi, name: &str, description: &str, price: f64) -> Item {
        match api
            .create_item(Json(ItemRequest::new(name, description, price)))
            .await
        {
            Ok(CreateItemResponse::Created(Json(item))) => item,
            Err(err) => panic!("Expected item to be created, got: {}", err),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_record() {
        let (_db, api) = setup_test_api().await;

        let created = create(&api, "Widget", "A widget", 9.99).await;
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Widget");
        assert_eq!(created.description, "A widget");
        assert_eq!(created.price, 9.99);

        let fetched = api.get_item(Path(created.id.into())).await.unwrap();
        assert_eq!(fetched.0, created);
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_rejected() {
        let (_db, api) = setup_test_api().await;

        let request = ItemRequest {
            description: None,
            ..ItemRequest::new("Widget", "A widget", 9.99)
        };
        let result = api.create_item(Json(request)).await;

        assert!(matches!(result, Err(ItemApiError::ValidationFailed(_))));
        assert!(api.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_zero_price_is_rejected() {
        let (_db, api) = setup_test_api().await;

        let result = api
            .create_item(Json(ItemRequest::new("Widget", "A widget", 0.0)))
            .await;

        assert!(matches!(result, Err(ItemApiError::ValidationFailed(_))));
        assert!(api.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_items_reverse_insertion_order() {
        let (_db, api) = setup_test_api().await;

        create(&api, "First", "one", 1.0).await;
        create(&api, "Second", "two", 2.0).await;
        create(&api, "Third", "three", 3.0).await;

        let items = api.list_items().await.unwrap();
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_get_missing_item_is_not_found() {
        let (_db, api) = setup_test_api().await;

        let result = api.get_item(Path(404)).await;

        match result {
            Err(err) => assert_eq!(err.status_code(), 404),
            Ok(item) => panic!("Expected not found, got: {:?}", item.0),
        }
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let (_db, api) = setup_test_api().await;
        let created = create(&api, "Widget", "A widget", 9.99).await;

        let updated = api
            .update_item(Path(created.id.into()), Json(ItemRequest::new("Gadget", "A gadget", 12.5)))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.description, "A gadget");
        assert_eq!(updated.price, 12.5);

        let fetched = api.get_item(Path(created.id.into())).await.unwrap();
        assert_eq!(fetched.0, updated.0);
    }

    #[tokio::test]
    async fn test_update_with_empty_name_leaves_row_unchanged() {
        let (_db, api) = setup_test_api().await;
        let created = create(&api, "Widget", "A widget", 9.99).await;

        let result = api
            .update_item(Path(created.id.into()), Json(ItemRequest::new("", "A gadget", 12.5)))
            .await;

        assert!(matches!(result, Err(ItemApiError::ValidationFailed(_))));
        let fetched = api.get_item(Path(created.id.into())).await.unwrap();
        assert_eq!(fetched.0, created);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let (_db, api) = setup_test_api().await;

        let result = api
            .update_item(Path(77), Json(ItemRequest::new("Gadget", "A gadget", 12.5)))
            .await;

        assert!(matches!(result, Err(ItemApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_body_wins_over_missing_item() {
        let (_db, api) = setup_test_api().await;

        let result = api.update_item(Path(77), Json(ItemRequest::default())).await;

        assert!(matches!(result, Err(ItemApiError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_db, api) = setup_test_api().await;
        let created = create(&api, "Widget", "A widget", 9.99).await;

        let response = api.delete_item(Path(created.id.into())).await.unwrap();
        assert_eq!(response.message, "Item deleted successfully");

        let result = api.get_item(Path(created.id.into())).await;
        assert!(matches!(result, Err(ItemApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let (_db, api) = setup_test_api().await;

        let result = api.delete_item(Path(5)).await;

        assert!(matches!(result, Err(ItemApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_database_failure_is_reported_generically() {
        let (db, api) = setup_test_api().await;

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "DROP TABLE items".to_string(),
        ))
        .await
        .unwrap();

        match api.list_items().await {
            Err(err) => {
                assert_eq!(err.status_code(), 500);
                assert_eq!(err.message(), "Database error");
            }
            Ok(items) => panic!("Expected database error, got: {:?}", items.0),
        }
    }

    async fn drop_items_table(db: &sea_orm::DatabaseConnection) {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "DROP TABLE items".to_string(),
        ))
        .await
        .unwrap();
    }

    fn assert_database_error<T>(result: Result<T, ItemApiError>) {
        match result {
            Err(err) => {
                assert_eq!(err.status_code(), 500);
                assert_eq!(err.message(), "Database error");
            }
            Ok(_) => panic!("Expected database error"),
        }
    }

    #[tokio::test]
    async fn test_database_failure_on_every_item_handler() {
        let (db, api) = setup_test_api().await;
        drop_items_table(&db).await;

        assert_database_error(api.get_item(Path(1)).await);
        assert_database_error(
            api.create_item(Json(ItemRequest::new("Widget", "A widget", 9.99)))
                .await,
        );
        assert_database_error(
            api.update_item(Path(1), Json(ItemRequest::new("Gadget", "A gadget", 12.5)))
                .await,
        );
        assert_database_error(api.delete_item(Path(1)).await);
    }

    #[tokio::test]
    async fn test_id_beyond_column_range_is_not_found() {
        let (_db, api) = setup_test_api().await;
        let id = i64::from(i32::MAX) + 1;

        assert!(matches!(
            api.get_item(Path(id)).await,
            Err(ItemApiError::NotFound(_))
        ));
        assert!(matches!(
            api.update_item(Path(id), Json(ItemRequest::new("Gadget", "A gadget", 1.0)))
                .await,
            Err(ItemApiError::NotFound(_))
        ));
        assert!(matches!(
            api.delete_item(Path(-99_999_999_999)).await,
            Err(ItemApiError::NotFound(_))
        ));
    }
}
