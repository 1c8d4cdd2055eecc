//! Scan command - barcode lookup then add

use crate::cli::args::ScanArgs;
use crate::cli::commands::{describe, describe_draft};
use crate::config::Config;
use crate::error::PantryResult;
use crate::intake::IntakeClient;
use crate::inventory::InventoryCache;
use crate::ui::{self, TaskSpinner, UiContext};

pub async fn execute(args: ScanArgs, cache: &InventoryCache, config: &Config) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let intake = IntakeClient::new(config)?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Looking up {}...", args.code.trim()));
    let product = match intake.lookup_barcode(&args.code).await {
        Ok(product) => {
            spinner.stop(&format!("Found {}", product.name));
            product
        }
        Err(e) => {
            spinner.stop_error("Lookup failed");
            return Err(e);
        }
    };

    let draft = product.into_draft();
    if args.dry_run {
        ui::key_value(&ctx, "would add", &describe_draft(&draft));
        return Ok(());
    }

    let saved = cache.add(draft).await?;
    ui::step_ok_detail(&ctx, &format!("Added {}", describe(&saved)), &saved.id);
    Ok(())
}
