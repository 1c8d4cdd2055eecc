//! Barcode product lookup
//!
//! Resolves a code either through the app's `/api/barcode` route or
//! straight against Open Food Facts, guessing name, quantity and unit.

use crate::api::wire::error_message;
use crate::config::{BarcodeSource, IntakeConfig};
use crate::error::{PantryError, PantryResult};
use crate::intake::IntakeClient;
use crate::inventory::IngredientDraft;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Best guess for a scanned product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeProduct {
    pub name: String,
    pub quantity_guess: f64,
    pub unit_guess: String,
}

impl BarcodeProduct {
    /// Shape accepted by `InventoryCache::add`
    pub fn into_draft(self) -> IngredientDraft {
        IngredientDraft::new(self.name, self.quantity_guess, self.unit_guess).normalized()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppLookup {
    #[serde(default)]
    found: bool,
    name: Option<String>,
    quantity_guess: Option<f64>,
    unit_guess: Option<String>,
}

/// Subset of an Open Food Facts product
#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    pub product_name: Option<String>,
    pub product_name_en: Option<String>,
    pub product_name_es: Option<String>,
    pub product_name_fr: Option<String>,
    pub generic_name: Option<String>,
    pub generic_name_en: Option<String>,
    pub generic_name_es: Option<String>,
    pub generic_name_fr: Option<String>,
    pub brands: Option<String>,
    /// String or number depending on the product
    pub product_quantity: Option<Value>,
    pub product_quantity_unit: Option<String>,
    pub quantity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OffResponse {
    product: Option<OffProduct>,
}

/// First non-blank name among product, generic and brand names
pub fn pick_name(product: &OffProduct) -> String {
    [
        &product.product_name,
        &product.product_name_en,
        &product.product_name_es,
        &product.product_name_fr,
        &product.generic_name,
        &product.generic_name_en,
        &product.generic_name_es,
        &product.generic_name_fr,
        &product.brands,
    ]
    .into_iter()
    .flatten()
    .map(|name| name.trim())
    .find(|name| !name.is_empty())
    .unwrap_or("Unknown product")
    .to_string()
}

/// Guess quantity and unit, falling back to `1 <default_unit>`
pub fn guess_quantity_and_unit(product: &OffProduct, intake: &IntakeConfig) -> (f64, String) {
    let mut quantity = 1.0;
    let mut unit = intake.default_unit.clone();

    if let Some(raw) = product.product_quantity.as_ref().filter(|v| is_present(v)) {
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => leading_number(s).map(|(q, _)| q),
            _ => None,
        };
        if let Some(q) = parsed.filter(|q| *q > 0.0) {
            quantity = q;
            if let Some(u) = product.product_quantity_unit.as_deref() {
                let u = u.trim().to_lowercase();
                if intake.is_allowed_unit(&u) {
                    unit = u;
                }
            }
        }
    } else if let Some(text) = product.quantity.as_deref() {
        if let Some((q, u)) = amount_with_unit(&text.to_lowercase()) {
            if q > 0.0 {
                quantity = q;
            }
            if intake.is_allowed_unit(&u) {
                unit = u;
            }
        }
    }

    (quantity, unit)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|q| q != 0.0),
        _ => true,
    }
}

/// Parse a leading decimal like `12` or `1.5`, returning the rest
fn leading_number(text: &str) -> Option<(f64, &str)> {
    let text = text.trim_start();
    let int_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }
    let mut end = int_len;
    let rest = &text[int_len..];
    if let Some(frac) = rest.strip_prefix('.') {
        let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

/// `"500 g"` / `"1.5kg pack"` to `(500.0, "g")`
fn amount_with_unit(text: &str) -> Option<(f64, String)> {
    let (quantity, rest) = leading_number(text)?;
    let unit: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if unit.is_empty() {
        return None;
    }
    Some((quantity, unit))
}

impl IntakeClient {
    /// Look up a product by barcode
    pub async fn lookup_barcode(&self, code: &str) -> PantryResult<BarcodeProduct> {
        let code = code.trim();
        if code.is_empty() {
            return Err(PantryError::User("Missing barcode".to_string()));
        }

        match self.intake.barcode_source {
            BarcodeSource::App => self.lookup_via_app(code).await,
            BarcodeSource::OpenFoodFacts => self.lookup_via_open_food_facts(code).await,
        }
    }

    async fn lookup_via_app(&self, code: &str) -> PantryResult<BarcodeProduct> {
        let url = self.server.endpoint("/api/barcode");
        debug!("GET {} code={}", url, code);

        let response = self
            .client
            .get(&url)
            .query(&[("code", code)])
            .send()
            .await
            .map_err(|e| PantryError::transport("barcode", e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PantryError::BarcodeNotFound(code.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PantryError::status("barcode", status.as_u16(), error_message(&body)));
        }

        let lookup: AppLookup = response
            .json()
            .await
            .map_err(|e| PantryError::transport("barcode", e))?;
        if !lookup.found {
            return Err(PantryError::BarcodeNotFound(code.to_string()));
        }

        Ok(BarcodeProduct {
            name: lookup.name.unwrap_or_else(|| "Unknown product".to_string()),
            quantity_guess: lookup.quantity_guess.unwrap_or(1.0),
            unit_guess: lookup
                .unit_guess
                .unwrap_or_else(|| self.intake.default_unit.clone()),
        })
    }

    async fn lookup_via_open_food_facts(&self, code: &str) -> PantryResult<BarcodeProduct> {
        let url = format!(
            "{}/api/v2/product/{}.json",
            self.intake.open_food_facts_url.trim_end_matches('/'),
            code
        );
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PantryError::transport("barcode", e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PantryError::BarcodeNotFound(code.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PantryError::status("barcode", status.as_u16(), error_message(&body)));
        }

        let body: OffResponse = response
            .json()
            .await
            .map_err(|e| PantryError::transport("barcode", e))?;
        let product = body
            .product
            .ok_or_else(|| PantryError::BarcodeNotFound(code.to_string()))?;

        let (quantity_guess, unit_guess) = guess_quantity_and_unit(&product, &self.intake);
        Ok(BarcodeProduct {
            name: pick_name(&product),
            quantity_guess,
            unit_guess,
        })
    }
}
