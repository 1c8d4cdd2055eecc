//! Optimistic inventory cache
//!
//! Every mutation edits local state synchronously, then reconciles with
//! the persistence API on a spawned task:
//! - `add` inserts a pending record and swaps in the server record on
//!   success, or drops it on failure.
//! - `update`, `remove` and `clear_all` snapshot the whole collection
//!   first and restore that snapshot on failure.
//!
//! Operations racing on the same id settle last-writer-wins in completion
//! order. A rollback restores the snapshot taken when its operation
//! started, overwriting whatever landed in between.

use crate::api::{PersistenceApi, ServerRecord};
use crate::error::{PantryError, PantryResult};
use crate::inventory::collection::InventoryCollection;
use crate::inventory::record::{IngredientDraft, IngredientPatch, IngredientRecord};
use crate::journal::SyncJournal;
use futures_util::future::join_all;
use serde_json::json;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Kind of in-flight mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Update,
    Remove,
    Clear,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Remove => "remove",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Handle to a mutation whose network exchange is still running.
///
/// Local state has already changed by the time this is returned. Awaiting
/// it yields the reconciled outcome; dropping it does not cancel anything.
#[derive(Debug)]
pub struct Mutation<T> {
    kind: MutationKind,
    target: Option<String>,
    handle: JoinHandle<PantryResult<T>>,
}

impl<T> Mutation<T> {
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Id the mutation addressed locally (the temporary id for an add)
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Mutation<T> {
    type Output = PantryResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let kind = self.kind;
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) => Poll::Ready(Err(PantryError::Internal(format!(
                "{} reconciliation task failed: {}",
                kind, e
            )))),
        }
    }
}

struct Shared {
    state: watch::Sender<InventoryCollection>,
    api: Arc<dyn PersistenceApi>,
    journal: Option<SyncJournal>,
}

impl Shared {
    fn restore(&self, snapshot: InventoryCollection) {
        self.state.send_replace(snapshot);
    }

    async fn journal(&self, event: &str, data: serde_json::Value) {
        if let Some(journal) = &self.journal {
            journal.record(event, &data).await;
        }
    }
}

/// Session inventory kept in sync with the persistence API.
///
/// Cheap to clone; clones share the same collection. Mutations spawn onto
/// the current tokio runtime and must be called from within one.
#[derive(Clone)]
pub struct InventoryCache {
    shared: Arc<Shared>,
}

impl InventoryCache {
    pub fn new(api: Arc<dyn PersistenceApi>) -> Self {
        Self::build(api, None)
    }

    /// Cache that journals every commit and rollback
    pub fn with_journal(api: Arc<dyn PersistenceApi>, journal: SyncJournal) -> Self {
        Self::build(api, Some(journal))
    }

    fn build(api: Arc<dyn PersistenceApi>, journal: Option<SyncJournal>) -> Self {
        let (state, _) = watch::channel(InventoryCollection::new());
        Self {
            shared: Arc::new(Shared {
                state,
                api,
                journal,
            }),
        }
    }

    /// Replace local state with the server's list.
    ///
    /// On failure local state is left exactly as it was.
    pub async fn load(&self) -> PantryResult<usize> {
        let records = match self.shared.api.list().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "inventory load failed, keeping local state");
                return Err(e);
            }
        };

        let collection: InventoryCollection =
            records.into_iter().map(ServerRecord::into_record).collect();
        let count = collection.len();
        self.shared.restore(collection);

        info!(
            count,
            backend = self.shared.api.backend_name(),
            "inventory loaded"
        );
        Ok(count)
    }

    /// Optimistically add an ingredient
    pub fn add(&self, draft: IngredientDraft) -> Mutation<IngredientRecord> {
        let pending = IngredientRecord::pending(&draft);
        let temp_id = pending.id.clone();
        self.shared.state.send_modify(|c| c.push(pending));
        debug!(temp_id = %temp_id, name = %draft.name, "optimistic add");

        let shared = Arc::clone(&self.shared);
        let id = temp_id.clone();
        let handle = tokio::spawn(async move {
            match shared.api.create(&draft).await {
                Ok(saved) => {
                    let confirmed = saved.into_record();
                    let replaced = shared
                        .state
                        .send_if_modified(|c| c.replace(&id, confirmed.clone()));
                    if replaced {
                        debug!(temp_id = %id, id = %confirmed.id, "add committed");
                    } else {
                        debug!(temp_id = %id, id = %confirmed.id, "pending record gone before commit");
                    }
                    shared
                        .journal("add.committed", json!({ "tempId": id, "id": confirmed.id }))
                        .await;
                    Ok(confirmed)
                }
                Err(e) => {
                    shared.state.send_if_modified(|c| c.remove(&id).is_some());
                    warn!(temp_id = %id, error = %e, "add failed, pending record discarded");
                    shared
                        .journal("add.rolled_back", json!({ "tempId": id, "error": e.to_string() }))
                        .await;
                    Err(e)
                }
            }
        });

        Mutation {
            kind: MutationKind::Add,
            target: Some(temp_id),
            handle,
        }
    }

    /// Optimistically merge `patch` into the record with `id`
    pub fn update(&self, id: &str, patch: IngredientPatch) -> Mutation<IngredientRecord> {
        let mut snapshot = InventoryCollection::new();
        let found = self.shared.state.send_if_modified(|c| {
            snapshot = c.clone();
            c.apply_patch(id, &patch)
        });
        if !found {
            debug!(id, "update target not present locally");
        }

        let shared = Arc::clone(&self.shared);
        let id = id.to_string();
        let target = id.clone();
        let handle = tokio::spawn(async move {
            match shared.api.update(&id, &patch).await {
                Ok(saved) => {
                    let canonical = saved.into_record();
                    shared
                        .state
                        .send_if_modified(|c| c.replace(&id, canonical.clone()));
                    debug!(id = %id, "update committed");
                    shared.journal("update.committed", json!({ "id": id })).await;
                    Ok(canonical)
                }
                Err(e) => {
                    shared.restore(snapshot);
                    warn!(id = %id, error = %e, "update failed, snapshot restored");
                    shared
                        .journal("update.rolled_back", json!({ "id": id, "error": e.to_string() }))
                        .await;
                    Err(e)
                }
            }
        });

        Mutation {
            kind: MutationKind::Update,
            target: Some(target),
            handle,
        }
    }

    /// Optimistically remove the record with `id`.
    ///
    /// The delete is sent even when `id` is not present locally.
    pub fn remove(&self, id: &str) -> Mutation<()> {
        let mut snapshot = InventoryCollection::new();
        let removed = self.shared.state.send_if_modified(|c| {
            snapshot = c.clone();
            c.remove(id).is_some()
        });
        if !removed {
            debug!(id, "remove target not present locally, deleting remotely anyway");
        }

        let shared = Arc::clone(&self.shared);
        let id = id.to_string();
        let target = id.clone();
        let handle = tokio::spawn(async move {
            match shared.api.delete(&id).await {
                Ok(()) => {
                    debug!(id = %id, "remove committed");
                    shared.journal("remove.committed", json!({ "id": id })).await;
                    Ok(())
                }
                Err(e) => {
                    shared.restore(snapshot);
                    warn!(id = %id, error = %e, "remove failed, snapshot restored");
                    shared
                        .journal("remove.rolled_back", json!({ "id": id, "error": e.to_string() }))
                        .await;
                    Err(e)
                }
            }
        });

        Mutation {
            kind: MutationKind::Remove,
            target: Some(target),
            handle,
        }
    }

    /// Empty the inventory, deleting every known record concurrently.
    ///
    /// If any delete fails the full pre-clear collection comes back, even
    /// though other deletes may have gone through on the server.
    pub fn clear_all(&self) -> Mutation<usize> {
        let mut snapshot = InventoryCollection::new();
        self.shared.state.send_if_modified(|c| {
            snapshot = c.take();
            !snapshot.is_empty()
        });

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let ids = snapshot.ids();
            let total = ids.len();
            let results = join_all(ids.iter().map(|id| shared.api.delete(id))).await;

            let failed: Vec<&String> = ids
                .iter()
                .zip(&results)
                .filter_map(|(id, result)| match result {
                    Ok(()) => None,
                    Err(e) => {
                        warn!(id = %id, error = %e, "delete failed during clear");
                        Some(id)
                    }
                })
                .collect();

            if failed.is_empty() {
                debug!(total, "clear committed");
                shared.journal("clear.committed", json!({ "total": total })).await;
                return Ok(total);
            }

            let failed_count = failed.len();
            let data = json!({ "total": total, "failed": failed });
            shared.restore(snapshot);
            warn!(failed = failed_count, total, "clear failed, snapshot restored");
            shared.journal("clear.rolled_back", data).await;
            Err(PantryError::PartialClear {
                failed: failed_count,
                total,
            })
        });

        Mutation {
            kind: MutationKind::Clear,
            target: None,
            handle,
        }
    }

    /// Copy of the current collection
    pub fn snapshot(&self) -> InventoryCollection {
        self.shared.state.borrow().clone()
    }

    /// Current records in insertion order
    pub fn records(&self) -> Vec<IngredientRecord> {
        self.shared.state.borrow().as_slice().to_vec()
    }

    pub fn get(&self, id: &str) -> Option<IngredientRecord> {
        self.shared.state.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().is_empty()
    }

    /// Ingredient names, the input to recipe suggestions
    pub fn names(&self) -> Vec<String> {
        self.shared.state.borrow().names()
    }

    /// Records newest first, the order the list view renders
    pub fn newest_first(&self) -> Vec<IngredientRecord> {
        self.shared.state.borrow().newest_first()
    }

    /// Watch every change to the collection
    pub fn subscribe(&self) -> watch::Receiver<InventoryCollection> {
        self.shared.state.subscribe()
    }
}

impl fmt::Debug for InventoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryCache")
            .field("backend", &self.shared.api.backend_name())
            .field("records", &self.len())
            .finish()
    }
}
