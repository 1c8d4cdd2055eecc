//! HTTP backend for the ingredients endpoints

use crate::api::wire::{error_message, refusal, ServerRecord, UpdateRequest};
use crate::api::PersistenceApi;
use crate::config::ServerConfig;
use crate::error::{PantryError, PantryResult};
use crate::inventory::{IngredientDraft, IngredientPatch};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

const INGREDIENTS_PATH: &str = "/api/ingredients";

/// Build the shared HTTP client from server settings
pub fn build_client(config: &ServerConfig) -> PantryResult<Client> {
    let mut builder = Client::builder().user_agent(concat!("pantry/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(PantryError::HttpClient)
}

/// Turn a non-2xx response into `PantryError::Status`
pub(crate) async fn ensure_success(operation: &'static str, response: Response) -> PantryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PantryError::status(operation, status.as_u16(), error_message(&body)))
}

/// `PersistenceApi` over `GET/POST/PUT/DELETE /api/ingredients`
pub struct HttpPersistence {
    client: Client,
    endpoint: String,
}

impl HttpPersistence {
    pub fn new(config: &ServerConfig) -> PantryResult<Self> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    pub fn with_client(client: Client, config: &ServerConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(INGREDIENTS_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PersistenceApi for HttpPersistence {
    async fn list(&self) -> PantryResult<Vec<ServerRecord>> {
        debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| PantryError::transport("list", e))?;
        let response = ensure_success("list", response).await?;
        response
            .json()
            .await
            .map_err(|e| PantryError::transport("list", e))
    }

    async fn create(&self, draft: &IngredientDraft) -> PantryResult<ServerRecord> {
        debug!("POST {} name={}", self.endpoint, draft.name);
        let response = self
            .client
            .post(&self.endpoint)
            .json(draft)
            .send()
            .await
            .map_err(|e| PantryError::transport("create", e))?;
        let response = ensure_success("create", response).await?;
        response
            .json()
            .await
            .map_err(|e| PantryError::transport("create", e))
    }

    async fn update(&self, id: &str, patch: &IngredientPatch) -> PantryResult<ServerRecord> {
        if id.is_empty() {
            return Err(PantryError::MissingId);
        }
        debug!("PUT {} id={}", self.endpoint, id);
        let response = self
            .client
            .put(&self.endpoint)
            .json(&UpdateRequest { id, patch })
            .send()
            .await
            .map_err(|e| PantryError::transport("update", e))?;
        let response = ensure_success("update", response).await?;
        let record: ServerRecord = response
            .json()
            .await
            .map_err(|e| PantryError::transport("update", e))?;
        if record.id.is_empty() {
            return Err(PantryError::MissingId);
        }
        Ok(record)
    }

    async fn delete(&self, id: &str) -> PantryResult<()> {
        debug!("DELETE {} id={}", self.endpoint, id);
        let response = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| PantryError::transport("delete", e))?;
        let response = ensure_success("delete", response).await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match refusal(&body) {
            Some(message) => Err(PantryError::status("delete", status, message)),
            None => Ok(()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let config = ServerConfig {
            base_url: "http://127.0.0.1:3000/".to_string(),
            timeout_secs: 5,
        };
        let api = HttpPersistence::new(&config).unwrap();
        assert_eq!(api.endpoint(), "http://127.0.0.1:3000/api/ingredients");
        assert_eq!(api.backend_name(), "http");
    }

    #[tokio::test]
    async fn update_without_id_fails_before_sending() {
        let api = HttpPersistence::new(&ServerConfig::default()).unwrap();
        let err = api
            .update("", &IngredientPatch::default().with_quantity(1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, PantryError::MissingId));
    }
}
