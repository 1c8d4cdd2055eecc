//! Session inventory: records, the ordered collection, and the
//! optimistic cache that keeps it in step with the server

pub mod cache;
pub mod collection;
pub mod record;

pub use cache::{InventoryCache, Mutation, MutationKind};
pub use collection::InventoryCollection;
pub use record::{IngredientDraft, IngredientPatch, IngredientRecord, PENDING_ID_PREFIX};
