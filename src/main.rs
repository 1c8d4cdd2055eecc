//! Pantry - kitchen inventory with optimistic sync
//!
//! CLI entry point: loads configuration, builds the inventory cache
//! against the configured server and dispatches to a subcommand.

use clap::Parser;
use console::style;
use pantry::api::HttpPersistence;
use pantry::cli::commands;
use pantry::cli::{Cli, Commands};
use pantry::config::{Config, ConfigManager};
use pantry::error::PantryResult;
use pantry::inventory::InventoryCache;
use pantry::journal::SyncJournal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            } else if e.is_retryable() {
                eprintln!("{} The server may recover; try again", style("Hint:").yellow());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PantryResult<()> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = manager.load().await?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    init_logging(cli.verbose, &config);
    pantry::ui::init_theme();
    debug!("Config loaded from {}", manager.path().display());

    // Config management never talks to the server
    let command = match cli.command {
        Commands::Config(args) => return commands::config(args, &manager, &config).await,
        other => other,
    };

    let api = Arc::new(HttpPersistence::new(&config.server)?);
    let cache = if config.general.journal {
        InventoryCache::with_journal(api, SyncJournal::new(&config))
    } else {
        InventoryCache::new(api)
    };
    let count = cache.load().await?;
    debug!("Loaded {} ingredient(s) from {}", count, config.server.base_url);

    match command {
        Commands::List(args) => commands::list(args, &cache).await,
        Commands::Add(args) => commands::add(args, &cache, &config).await,
        Commands::Update(args) => commands::update(args, &cache).await,
        Commands::Remove(args) => commands::remove(args, &cache).await,
        Commands::Clear(args) => commands::clear(args, &cache).await,
        Commands::Scan(args) => commands::scan(args, &cache, &config).await,
        Commands::Receipt(args) => commands::receipt(args, &cache, &config).await,
        Commands::Recipes(args) => commands::recipes(args, &cache, &config).await,
        Commands::Config(_) => unreachable!("config handled above"),
    }
}

/// 0 = warn, 1 = info, 2+ = debug; `general.verbose` counts as one `-v`
fn init_logging(verbose: u8, config: &Config) {
    let level = verbose.max(u8::from(config.general.verbose));
    let filter = match level {
        0 => EnvFilter::new("pantry=warn"),
        1 => EnvFilter::new("pantry=info"),
        _ => EnvFilter::new("pantry=debug"),
    };

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}
