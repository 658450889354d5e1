use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::item;
use crate::types::internal::ItemFields;

/// Request model for creating or replacing an item
///
/// Every field is optional on the wire so that a missing field is answered
/// with the same validation error as an empty one.
#[derive(Object, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Name of the item
    pub name: Option<String>,

    /// Description of the item
    pub description: Option<String>,

    /// Price of the item
    pub price: Option<f64>,
}

impl ItemRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            price: Some(price),
        }
    }

    /// Presence check shared by create and update
    ///
    /// Returns `None` when any field is missing or falsy: an empty string,
    /// or a price of zero or NaN. No range or format checks are applied.
    pub fn into_fields(self) -> Option<ItemFields> {
        let name = self.name.filter(|name| !name.is_empty())?;
        let description = self.description.filter(|description| !description.is_empty())?;
        let price = self.price.filter(|price| *price != 0.0 && !price.is_nan())?;

        Some(ItemFields {
            name,
            description,
            price,
        })
    }
}

/// Response model representing a stored item
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned by the store
    pub id: i32,

    /// Name of the item
    pub name: String,

    /// Description of the item
    pub description: String,

    /// Price of the item
    pub price: f64,

    /// Timestamp when the item was created
    pub created_at: DateTime<Utc>,
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            created_at: model.created_at,
        }
    }
}

/// Response model for a successful delete
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    /// Confirmation message
    pub message: String,
}
