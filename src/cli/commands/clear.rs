//! Clear command - remove every ingredient

use crate::cli::args::ClearArgs;
use crate::error::PantryResult;
use crate::inventory::InventoryCache;
use crate::ui::{self, TaskSpinner, UiContext};

pub async fn execute(args: ClearArgs, cache: &InventoryCache) -> PantryResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let count = cache.len();
    if count == 0 {
        ui::step_info(&ctx, "Inventory is already empty");
        return Ok(());
    }

    let prompt = format!("Delete all {} ingredient(s)?", count);
    if !ui::confirm(&ctx, &prompt, false).await? {
        ui::step_warn_hint(&ctx, "Nothing deleted", "Pass --yes to skip the prompt");
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Deleting {} ingredient(s)...", count));
    match cache.clear_all().await {
        Ok(deleted) => {
            spinner.stop(&format!("Deleted {} ingredient(s)", deleted));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Clear failed, inventory restored");
            Err(e)
        }
    }
}
