//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{BarcodeSource, Config, ConfigManager};
use crate::error::{PantryError, PantryResult};
use crate::ui::{self, UiContext};

const KEYS: [&str; 9] = [
    "general.verbose",
    "general.log_format",
    "general.journal",
    "server.base_url",
    "server.timeout_secs",
    "intake.default_unit",
    "intake.allowed_units",
    "intake.barcode_source",
    "intake.open_food_facts_url",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> PantryResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => println!("{}", toml::to_string_pretty(config)?),
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());
    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> PantryResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    if let Err(e) = apply_setting(&mut config, key, value) {
        if matches!(e, PantryError::ConfigKey(_)) {
            ui::remark(&ctx, &format!("Valid keys: {}", KEYS.join(", ")));
        }
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));
    Ok(())
}

/// Write one dotted key into `config`
pub fn apply_setting(config: &mut Config, key: &str, value: &str) -> PantryResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => {
            config.general.log_format = match value {
                "text" | "json" => value.to_string(),
                _ => {
                    return Err(PantryError::User(format!(
                        "Invalid log format: {}. Use text or json",
                        value
                    )))
                }
            }
        }
        ["general", "journal"] => config.general.journal = parse_bool(value)?,

        ["server", "base_url"] => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(PantryError::User(format!(
                    "Invalid base URL: {}. It must start with http:// or https://",
                    value
                )));
            }
            config.server.base_url = value.to_string();
        }
        ["server", "timeout_secs"] => {
            config.server.timeout_secs = value
                .parse()
                .map_err(|_| PantryError::User(format!("Invalid number: {}", value)))?
        }

        ["intake", "default_unit"] => config.intake.default_unit = value.trim().to_lowercase(),
        ["intake", "allowed_units"] => {
            config.intake.allowed_units = value
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        ["intake", "barcode_source"] => {
            config.intake.barcode_source = match value {
                "app" => BarcodeSource::App,
                "open-food-facts" => BarcodeSource::OpenFoodFacts,
                _ => {
                    return Err(PantryError::User(format!(
                        "Invalid barcode source: {}. Use app or open-food-facts",
                        value
                    )))
                }
            }
        }
        ["intake", "open_food_facts_url"] => config.intake.open_food_facts_url = value.to_string(),

        _ => return Err(PantryError::ConfigKey(key.to_string())),
    }

    Ok(())
}

fn parse_bool(value: &str) -> PantryResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PantryError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sets_known_keys() {
        let mut config = Config::default();
        apply_setting(&mut config, "server.timeout_secs", "5").unwrap();
        apply_setting(&mut config, "general.journal", "yes").unwrap();
        apply_setting(&mut config, "intake.allowed_units", "g, KG ,,ml").unwrap();
        apply_setting(&mut config, "intake.barcode_source", "open-food-facts").unwrap();

        assert_eq!(config.server.timeout_secs, 5);
        assert!(config.general.journal);
        assert_eq!(config.intake.allowed_units, vec!["g", "kg", "ml"]);
        assert_eq!(config.intake.barcode_source, BarcodeSource::OpenFoodFacts);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            apply_setting(&mut config, "server.port", "80"),
            Err(PantryError::ConfigKey(_))
        ));
        assert!(apply_setting(&mut config, "server.base_url", "localhost:3000").is_err());
        assert!(apply_setting(&mut config, "general.verbose", "maybe").is_err());
        assert!(apply_setting(&mut config, "general.log_format", "xml").is_err());
    }

    #[test]
    fn every_listed_key_is_settable() {
        let samples = [
            "true",
            "json",
            "false",
            "http://localhost:4000",
            "10",
            "g",
            "g,kg",
            "app",
            "https://off.example",
        ];
        let mut config = Config::default();
        for (key, value) in KEYS.iter().zip(samples) {
            apply_setting(&mut config, key, value).unwrap();
        }
    }

    #[tokio::test]
    async fn set_persists_to_file() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        set_value(&manager, &Config::default(), "server.base_url", "http://pantry.lan")
            .await
            .unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.server.base_url, "http://pantry.lan");
    }
}
