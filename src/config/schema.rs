//! Configuration schema for Pantry
//!
//! Configuration is stored at `~/.config/pantry/config.toml`

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Persistence server settings
    pub server: ServerConfig,

    /// Ingredient intake settings (barcode, receipt)
    pub intake: IntakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,

    /// Append sync outcomes to the journal file
    pub journal: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
            journal: false,
        }
    }
}

/// Persistence server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the app serving `/api/*`
    pub base_url: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Absolute URL for an API path such as `/api/ingredients`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where barcode lookups are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarcodeSource {
    /// The app's own `/api/barcode` route
    #[default]
    App,
    /// Query Open Food Facts directly and guess locally
    OpenFoodFacts,
}

/// Ingredient intake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Unit used when none is given or recognised
    pub default_unit: String,

    /// Units accepted from barcode guesses
    pub allowed_units: Vec<String>,

    /// Barcode lookup backend
    pub barcode_source: BarcodeSource,

    /// Open Food Facts base URL
    pub open_food_facts_url: String,
}

impl IntakeConfig {
    pub fn is_allowed_unit(&self, unit: &str) -> bool {
        self.allowed_units.iter().any(|u| u == unit)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_unit: "pcs".to_string(),
            allowed_units: ["pcs", "g", "kg", "ml", "l", "tbsp", "tsp", "cup"]
                .iter()
                .map(|u| u.to_string())
                .collect(),
            barcode_source: BarcodeSource::App,
            open_food_facts_url: "https://world.openfoodfacts.org".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("barcode_source = \"app\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert!(config.intake.is_allowed_unit("tbsp"));
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [server]
            base_url = "http://pantry.lan:8080/"

            [intake]
            barcode_source = "open-food-facts"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.server.endpoint("/api/ingredients"),
            "http://pantry.lan:8080/api/ingredients"
        );
        assert_eq!(config.server.timeout_secs, 30); // default preserved
        assert_eq!(config.intake.barcode_source, BarcodeSource::OpenFoodFacts);
    }

    #[test]
    fn zero_timeout_disables() {
        let server = ServerConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(server.timeout().is_none());
    }
}
