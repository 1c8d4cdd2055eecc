//! Ingredient records and the shapes used to create and patch them

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix that marks a client-temporary id.
pub const PENDING_ID_PREFIX: &str = "pending-";

/// Generate a fresh temporary id for an optimistic insert.
pub fn new_pending_id() -> String {
    format!("{}{}", PENDING_ID_PREFIX, Uuid::new_v4())
}

/// One ingredient as the session sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    /// Server id once confirmed, temporary id while pending
    pub id: String,

    /// Display name
    pub name: String,

    /// Non-negative amount
    pub quantity: f64,

    /// Free-form unit token
    pub unit: String,

    /// Creation instant in milliseconds since the Unix epoch
    pub added_at: i64,
}

impl IngredientRecord {
    /// Build a pending record from a draft, stamped with the local clock
    pub fn pending(draft: &IngredientDraft) -> Self {
        Self {
            id: new_pending_id(),
            name: draft.name.clone(),
            quantity: draft.quantity,
            unit: draft.unit.clone(),
            added_at: Utc::now().timestamp_millis(),
        }
    }

    /// Whether this record still carries a client-temporary id
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(PENDING_ID_PREFIX)
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: &IngredientPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = &patch.unit {
            self.unit = unit.clone();
        }
    }
}

/// Fields supplied when adding an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientDraft {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Trim and lower-case the name, as every intake path does before adding
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_lowercase();
        self
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl IngredientPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.unit.is_none()
    }
}
