//! Persistence API abstraction
//!
//! The inventory cache talks to the authoritative store only through
//! [`PersistenceApi`], so tests can script outcomes and the binary can
//! plug in the HTTP backend.

mod http;
pub mod wire;

pub use http::{build_client, HttpPersistence};
pub(crate) use http::ensure_success;
pub use wire::{ServerRecord, ServerTimestamp};

use crate::error::PantryResult;
use crate::inventory::{IngredientDraft, IngredientPatch};
use async_trait::async_trait;

/// CRUD contract of the ingredients store
#[async_trait]
pub trait PersistenceApi: Send + Sync {
    /// Fetch every stored record
    async fn list(&self) -> PantryResult<Vec<ServerRecord>>;

    /// Create a record; the server assigns `id` and `addedAt`
    async fn create(&self, draft: &IngredientDraft) -> PantryResult<ServerRecord>;

    /// Apply a partial update and return the full stored record
    async fn update(&self, id: &str, patch: &IngredientPatch) -> PantryResult<ServerRecord>;

    /// Delete a record by id
    async fn delete(&self, id: &str) -> PantryResult<()>;

    /// Human-readable backend name for logs
    fn backend_name(&self) -> &'static str;
}
