use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientSettings;
use crate::types::dto::common::HealthResponse;
use crate::types::dto::items::{DeleteItemResponse, Item, ItemRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service responded {status}: {message}")]
    Service { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of a service error, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|status| status.as_u16()),
        }
    }
}

/// Operations the item manager needs from the service
#[async_trait]
pub trait ItemBackend: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;

    async fn create_item(&self, request: &ItemRequest) -> Result<Item, ClientError>;

    async fn update_item(&self, id: i32, request: &ItemRequest) -> Result<Item, ClientError>;

    /// Returns the service's confirmation message
    async fn delete_item(&self, id: i32) -> Result<String, ClientError>;
}

/// Error body shape returned by the item store service
#[derive(Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// HTTP client for the item store API
#[derive(Debug, Clone)]
pub struct ItemsClient {
    http: Client,
    base_url: String,
}

impl ItemsClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: settings.api_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        Self::decode(response).await
    }

    pub async fn get_item(&self, id: i32) -> Result<Item, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/items/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Decode a success body, or turn an error status into ClientError::Service
    ///
    /// The service's message is preferred; a non-JSON body is passed through as text.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message.or(parsed.error))
            .unwrap_or(body);

        Err(ClientError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ItemBackend for ItemsClient {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.http.get(self.url("/items")).send().await?;
        Self::decode(response).await
    }

    async fn create_item(&self, request: &ItemRequest) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(self.url("/items"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_item(&self, id: i32, request: &ItemRequest) -> Result<Item, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/items/{}", id)))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_item(&self, id: i32) -> Result<String, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/items/{}", id)))
            .send()
            .await?;
        let body: DeleteItemResponse = Self::decode(response).await?;
        Ok(body.message)
    }
}
