//! Recipes command - ideas from current stock

use crate::cli::args::{OutputFormat, RecipesArgs};
use crate::config::Config;
use crate::error::PantryResult;
use crate::intake::{IntakeClient, RecipeSuggestions};
use crate::inventory::InventoryCache;
use crate::ui::{self, TaskSpinner, UiContext};
use console::style;

pub async fn execute(
    args: RecipesArgs,
    cache: &InventoryCache,
    config: &Config,
) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let names = cache.names();
    if names.is_empty() {
        ui::step_info(&ctx, "No ingredients in stock; add some first");
        return Ok(());
    }

    let intake = IntakeClient::new(config)?;
    let mut spinner = TaskSpinner::new(&ctx);
    if args.format == OutputFormat::Table {
        spinner.start(&format!("Asking for ideas with {} ingredient(s)...", names.len()));
    }
    let suggestions = match intake.suggest_recipes(&names).await {
        Ok(suggestions) => {
            spinner.clear();
            suggestions
        }
        Err(e) => {
            spinner.stop_error("Recipe service failed");
            return Err(e);
        }
    };

    match args.format {
        OutputFormat::Table => print_ideas(&ctx, &suggestions),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
        OutputFormat::Plain => {
            for idea in &suggestions.ideas {
                println!("{}", idea.title);
            }
        }
    }
    Ok(())
}

fn print_ideas(ctx: &UiContext, suggestions: &RecipeSuggestions) {
    ui::intro(ctx, "Recipe ideas");
    if let Some(note) = suggestions.note.as_deref() {
        ui::step_warn(ctx, note);
    }

    for idea in &suggestions.ideas {
        println!();
        println!("{}", style(&idea.title).bold());
        println!("  {} {}", style("uses").dim(), idea.ingredients.join(", "));
        if !idea.missing.is_empty() {
            println!("  {} {}", style("needs").yellow(), idea.missing.join(", "));
        }
        for (n, step) in idea.steps.iter().enumerate() {
            println!("  {}. {}", n + 1, step);
        }
    }
}
