//! Add command

use crate::cli::args::AddArgs;
use crate::cli::commands::describe;
use crate::config::Config;
use crate::error::{PantryError, PantryResult};
use crate::inventory::{IngredientDraft, InventoryCache};
use crate::ui::{self, UiContext};

pub async fn execute(args: AddArgs, cache: &InventoryCache, config: &Config) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let unit = args
        .unit
        .unwrap_or_else(|| config.intake.default_unit.clone());
    let draft = IngredientDraft::new(args.name, args.quantity, unit).normalized();

    if draft.name.is_empty() {
        return Err(PantryError::User("Ingredient name is empty".to_string()));
    }
    if !draft.quantity.is_finite() || draft.quantity < 0.0 {
        return Err(PantryError::User(format!(
            "Quantity must be a non-negative number, got {}",
            draft.quantity
        )));
    }

    let saved = cache.add(draft).await?;
    ui::step_ok_detail(&ctx, &format!("Added {}", describe(&saved)), &saved.id);
    Ok(())
}
