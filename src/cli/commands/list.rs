//! List command - show the inventory

use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::PantryResult;
use crate::inventory::{IngredientRecord, InventoryCache};
use crate::ui::{self, UiContext};
use chrono::{DateTime, Local};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, cache: &InventoryCache) -> PantryResult<()> {
    let records = cache.newest_first();

    if records.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => ui::step_info(&UiContext::detect(), "No ingredients yet"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&records),
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Plain => print_plain(&records),
    }

    Ok(())
}

fn added_label(added_at: i64) -> String {
    DateTime::from_timestamp_millis(added_at)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(records: &[IngredientRecord]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Inventory");

    println!(
        "{:<38} {:<24} {:>10} {:<6} {:<16}",
        style("ID").bold(),
        style("NAME").bold(),
        style("QTY").bold(),
        style("UNIT").bold(),
        style("ADDED").bold()
    );
    println!("{}", "-".repeat(98));

    for record in records {
        let id = if record.is_pending() {
            style(record.id.as_str()).yellow()
        } else {
            style(record.id.as_str()).dim()
        };
        println!(
            "{:<38} {:<24} {:>10} {:<6} {:<16}",
            id,
            record.name,
            record.quantity,
            record.unit,
            added_label(record.added_at)
        );
    }

    println!();
    println!("{} ingredient(s)", records.len());
}

fn print_json(records: &[IngredientRecord]) -> PantryResult<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn print_plain(records: &[IngredientRecord]) {
    for record in records {
        println!("{}\t{}\t{}\t{}", record.id, record.name, record.quantity, record.unit);
    }
}
