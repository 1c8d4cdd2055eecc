//! Insertion-ordered record set keyed by id

use crate::inventory::record::{IngredientPatch, IngredientRecord};
use serde::Serialize;

/// The in-memory inventory.
///
/// Ids are unique at all times: every insertion path evicts an existing
/// record carrying the same id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InventoryCollection {
    records: Vec<IngredientRecord>,
}

impl InventoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IngredientRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[IngredientRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&IngredientRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Records that have not been confirmed by the server yet
    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_pending()).count()
    }

    /// Append a record, or overwrite in place if its id is already present
    pub fn push(&mut self, record: IngredientRecord) {
        match self.position(&record.id) {
            Some(idx) => self.records[idx] = record,
            None => self.records.push(record),
        }
    }

    /// Remove by id; `None` if absent
    pub fn remove(&mut self, id: &str) -> Option<IngredientRecord> {
        let idx = self.position(id)?;
        Some(self.records.remove(idx))
    }

    /// Merge a patch into the record with `id`. Returns whether it was found.
    pub fn apply_patch(&mut self, id: &str, patch: &IngredientPatch) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Replace the record at `target_id` in place with `record`.
    ///
    /// Any other record already holding `record.id` is dropped so the
    /// replacement never duplicates an id. Returns false, leaving the
    /// collection untouched, when `target_id` is absent.
    pub fn replace(&mut self, target_id: &str, record: IngredientRecord) -> bool {
        if !self.contains(target_id) {
            return false;
        }
        if record.id != target_id {
            self.records.retain(|r| r.id != record.id);
        }
        match self.position(target_id) {
            Some(idx) => {
                self.records[idx] = record;
                true
            }
            None => false,
        }
    }

    /// Drop every record, returning what was there
    pub fn take(&mut self) -> InventoryCollection {
        std::mem::take(self)
    }

    /// Records ordered by creation time, newest first
    pub fn newest_first(&self) -> Vec<IngredientRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        sorted
    }

    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl FromIterator<IngredientRecord> for InventoryCollection {
    fn from_iter<I: IntoIterator<Item = IngredientRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.push(record);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a InventoryCollection {
    type Item = &'a IngredientRecord;
    type IntoIter = std::slice::Iter<'a, IngredientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
