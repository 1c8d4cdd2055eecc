//! Receipt command - OCR a receipt photo and add every line

use crate::cli::args::ReceiptArgs;
use crate::cli::commands::describe_draft;
use crate::config::Config;
use crate::error::{PantryError, PantryResult};
use crate::intake::IntakeClient;
use crate::inventory::InventoryCache;
use crate::ui::{self, BatchProgress, TaskSpinner, UiContext};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::fs;
use tracing::warn;

pub async fn execute(
    args: ReceiptArgs,
    cache: &InventoryCache,
    config: &Config,
) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let image = fs::read(&args.image)
        .await
        .map_err(|e| PantryError::io(format!("reading {}", args.image.display()), e))?;

    let intake = IntakeClient::new(config)?;
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Reading receipt...");
    let scan = match intake.extract_receipt(&image).await {
        Ok(scan) => {
            spinner.stop(&format!("Found {} item(s)", scan.drafts.len()));
            scan
        }
        Err(e) => {
            spinner.stop_error("Receipt extraction failed");
            return Err(e);
        }
    };

    if let Some(note) = scan.note.as_deref().or(scan.error.as_deref()) {
        ui::step_warn_hint(&ctx, "OCR service used a fallback", note);
    }
    if scan.drafts.is_empty() {
        ui::step_info(&ctx, "No ingredients recognised");
        return Ok(());
    }
    if args.dry_run {
        for draft in &scan.drafts {
            ui::remark(&ctx, &describe_draft(draft));
        }
        return Ok(());
    }

    let total = scan.drafts.len();
    let progress = BatchProgress::new(&ctx, "Storing items", total as u64);

    // Every add is applied locally before any of them settles.
    let mut pending: FuturesUnordered<_> = scan
        .drafts
        .into_iter()
        .map(|draft| {
            let label = describe_draft(&draft);
            let mutation = cache.add(draft);
            async move { (label, mutation.await) }
        })
        .collect();

    let mut failed = 0;
    while let Some((label, outcome)) = pending.next().await {
        progress.settle(&label, outcome.is_ok());
        if let Err(e) = outcome {
            failed += 1;
            warn!(item = %label, error = %e, "receipt item not stored");
        }
    }
    progress.finish();

    if failed > 0 {
        return Err(PantryError::User(format!(
            "{} of {} receipt item(s) could not be stored",
            failed, total
        )));
    }
    ui::outro_success(&ctx, &format!("Stored {} item(s)", total));
    Ok(())
}
