//! CLI command implementations

pub mod add;
pub mod clear;
pub mod config;
pub mod list;
pub mod receipt;
pub mod recipes;
pub mod remove;
pub mod scan;
pub mod update;

pub use add::execute as add;
pub use clear::execute as clear;
pub use config::execute as config;
pub use list::execute as list;
pub use receipt::execute as receipt;
pub use recipes::execute as recipes;
pub use remove::execute as remove;
pub use scan::execute as scan;
pub use update::execute as update;

use crate::inventory::{IngredientDraft, IngredientRecord};

/// `tomato (3 pcs)`
pub(crate) fn describe(record: &IngredientRecord) -> String {
    format!("{} ({} {})", record.name, record.quantity, record.unit)
}

pub(crate) fn describe_draft(draft: &IngredientDraft) -> String {
    format!("{} ({} {})", draft.name, draft.quantity, draft.unit)
}
