//! Remove command

use crate::cli::args::RemoveArgs;
use crate::cli::commands::describe;
use crate::error::PantryResult;
use crate::inventory::InventoryCache;
use crate::ui::{self, UiContext};

pub async fn execute(args: RemoveArgs, cache: &InventoryCache) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let label = cache
        .get(&args.id)
        .map(|record| describe(&record))
        .unwrap_or_else(|| args.id.clone());

    cache.remove(&args.id).await?;
    ui::step_ok(&ctx, &format!("Removed {}", label));
    Ok(())
}
