//! Receipt OCR intake

use crate::api::ensure_success;
use crate::error::{PantryError, PantryResult};
use crate::intake::{extract_json_array, IntakeClient};
use crate::inventory::IngredientDraft;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Ingredients extracted from one receipt photo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptScan {
    pub drafts: Vec<IngredientDraft>,
    /// Service remark, e.g. that no OCR key was configured
    pub note: Option<String>,
    /// Service-side failure that led to placeholder results
    pub error: Option<String>,
}

impl ReceiptScan {
    /// The service answered with placeholder ingredients
    pub fn is_fallback(&self) -> bool {
        self.note.is_some() || self.error.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ScanBody {
    #[serde(default)]
    ingredients: Vec<Value>,
    note: Option<String>,
    error: Option<String>,
}

/// Map common unit spellings onto short tokens
pub fn canonical_unit(unit: &str) -> &str {
    match unit {
        "grams" | "gram" | "g" => "g",
        "kilogram" | "kilograms" | "kg" => "kg",
        "milliliter" | "milliliters" | "ml" => "ml",
        "liter" | "liters" | "l" => "l",
        "piece" | "pieces" | "pc" | "pcs" => "pcs",
        other => other,
    }
}

/// Normalize one raw OCR item; `None` if it has no usable name
pub fn normalize_item(item: &Value, default_unit: &str) -> Option<IngredientDraft> {
    let obj = item.as_object()?;
    let name = obj.get("name")?.as_str()?.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    let quantity = obj
        .get("quantity")
        .and_then(Value::as_f64)
        .unwrap_or(1.0);
    let unit = obj
        .get("unit")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_else(|| default_unit.to_string());

    Some(IngredientDraft::new(name, quantity, canonical_unit(&unit)))
}

/// Parse an OCR reply: `{ingredients, note?, error?}` or a bare item array
pub fn parse_scan(body: &str, default_unit: &str) -> PantryResult<ReceiptScan> {
    let (items, note, error) = match serde_json::from_str::<ScanBody>(body) {
        Ok(scan) => (scan.ingredients, scan.note, scan.error),
        Err(_) => {
            let items = extract_json_array(body).ok_or_else(|| PantryError::MalformedResponse {
                service: "ocr",
                reason: "no ingredient list in reply".to_string(),
            })?;
            (items, None, None)
        }
    };

    let drafts = items
        .iter()
        .filter_map(|item| normalize_item(item, default_unit))
        .collect();

    Ok(ReceiptScan {
        drafts,
        note,
        error,
    })
}

impl IntakeClient {
    /// Send a receipt image to the OCR route
    pub async fn extract_receipt(&self, image: &[u8]) -> PantryResult<ReceiptScan> {
        let url = self.server.endpoint("/api/ocr");
        debug!("POST {} ({} bytes)", url, image.len());

        let body = serde_json::json!({ "imageBase64": STANDARD.encode(image) });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PantryError::transport("ocr", e))?;
        let response = ensure_success("ocr", response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| PantryError::transport("ocr", e))?;

        parse_scan(&text, &self.intake.default_unit)
    }
}
