//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pantry - kitchen inventory with optimistic sync
///
/// Keeps a local copy of your ingredients in step with the pantry
/// server, and feeds barcode scans, receipt photos and recipe ideas
/// through it.
#[derive(Parser, Debug)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PANTRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides server.base_url)
    #[arg(short, long, global = true, env = "PANTRY_SERVER")]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List ingredients, newest first
    List(ListArgs),

    /// Add an ingredient
    Add(AddArgs),

    /// Change fields of an ingredient
    Update(UpdateArgs),

    /// Remove an ingredient
    Remove(RemoveArgs),

    /// Remove every ingredient
    Clear(ClearArgs),

    /// Look up a barcode and add the product
    Scan(ScanArgs),

    /// Extract ingredients from a receipt photo and add them
    Receipt(ReceiptArgs),

    /// Suggest recipes from what is in stock
    Recipes(RecipesArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Ingredient name
    pub name: String,

    #[arg(short, long, default_value_t = 1.0)]
    pub quantity: f64,

    /// Unit (defaults to intake.default_unit)
    #[arg(short, long)]
    pub unit: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Ingredient id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub quantity: Option<f64>,

    #[arg(long)]
    pub unit: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Ingredient id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// EAN/UPC code
    pub code: String,

    /// Only show the lookup result
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct ReceiptArgs {
    /// Receipt image (jpg, png)
    pub image: PathBuf,

    /// Only show extracted items
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct RecipesArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., server.base_url)
        key: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// One item per line
    Plain,
}
