//! Ingredient intake services
//!
//! Thin clients for the barcode, receipt OCR and recipe routes. They turn
//! service replies into [`IngredientDraft`](crate::inventory::IngredientDraft)s
//! or recipe ideas; none of them touch the inventory cache.

pub mod barcode;
pub mod receipt;
pub mod recipes;

pub use barcode::BarcodeProduct;
pub use receipt::ReceiptScan;
pub use recipes::{RecipeIdea, RecipeSuggestions};

use crate::api::build_client;
use crate::config::{Config, IntakeConfig, ServerConfig};
use crate::error::PantryResult;
use reqwest::Client;
use serde_json::Value;

/// Client for the intake routes of the app
pub struct IntakeClient {
    client: Client,
    server: ServerConfig,
    intake: IntakeConfig,
}

impl IntakeClient {
    pub fn new(config: &Config) -> PantryResult<Self> {
        Ok(Self::with_client(build_client(&config.server)?, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            server: config.server.clone(),
            intake: config.intake.clone(),
        }
    }
}

/// Find a JSON array in free-form model output.
///
/// Accepts a bare array, an array wrapped in prose, or one inside
/// markdown code fences.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    parse_array(text.trim()).or_else(|| parse_array(&strip_markdown_fences(text)))
}

fn parse_array(text: &str) -> Option<Vec<Value>> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return Some(items);
    }
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn strip_markdown_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}
