//! Update command

use crate::cli::args::UpdateArgs;
use crate::cli::commands::describe;
use crate::error::{PantryError, PantryResult};
use crate::inventory::{IngredientPatch, InventoryCache};
use crate::ui::{self, UiContext};

pub async fn execute(args: UpdateArgs, cache: &InventoryCache) -> PantryResult<()> {
    let ctx = UiContext::detect();

    let mut patch = IngredientPatch::default();
    if let Some(name) = args.name {
        patch = patch.with_name(name.trim().to_lowercase());
    }
    if let Some(quantity) = args.quantity {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(PantryError::User(format!(
                "Quantity must be a non-negative number, got {}",
                quantity
            )));
        }
        patch = patch.with_quantity(quantity);
    }
    if let Some(unit) = args.unit {
        patch = patch.with_unit(unit.trim().to_lowercase());
    }
    if patch.is_empty() {
        return Err(PantryError::User(
            "Nothing to update; pass --name, --quantity or --unit".to_string(),
        ));
    }

    if cache.get(&args.id).is_none() {
        ui::step_warn(&ctx, &format!("{} is not in the local inventory", args.id));
    }

    let saved = cache.update(&args.id, patch).await?;
    ui::step_ok(&ctx, &format!("Updated {}", describe(&saved)));
    Ok(())
}
