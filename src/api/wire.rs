//! JSON shapes exchanged with the ingredients endpoints

use crate::inventory::{IngredientPatch, IngredientRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Server-native creation timestamp: epoch milliseconds or a date string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl ServerTimestamp {
    /// Convert to epoch milliseconds, `None` if the text is not a date
    pub fn to_millis(&self) -> Option<i64> {
        match self {
            Self::Millis(ms) => Some(*ms),
            Self::Fractional(ms) if ms.is_finite() => Some(ms.round() as i64),
            Self::Fractional(_) => None,
            Self::Text(text) => parse_timestamp_text(text),
        }
    }
}

impl From<DateTime<Utc>> for ServerTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339())
    }
}

fn parse_timestamp_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    // SQL-style "2024-05-01 10:00:00[.fff]" without zone is taken as UTC
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            // Date-only "2024-05-01" is midnight UTC
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().timestamp_millis())
        .or_else(|| text.parse::<i64>().ok())
}

/// Flat record as returned by list/create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub added_at: ServerTimestamp,
}

impl ServerRecord {
    /// Convert to the local representation.
    ///
    /// An unreadable timestamp falls back to the local clock; `addedAt`
    /// only drives ordering.
    pub fn into_record(self) -> IngredientRecord {
        let added_at = self.added_at.to_millis().unwrap_or_else(|| {
            warn!(id = %self.id, added_at = ?self.added_at, "unreadable server timestamp, using local clock");
            Utc::now().timestamp_millis()
        });
        IngredientRecord {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
            added_at,
        }
    }
}

/// Body of `PUT /api/ingredients`
#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub patch: &'a IngredientPatch,
}

/// Body of `DELETE /api/ingredients` and error replies
#[derive(Debug, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Message for a 2xx reply that still says `{"ok": false}`.
///
/// Empty or non-JSON bodies count as acknowledged.
pub fn refusal(body: &str) -> Option<String> {
    match serde_json::from_str::<Acknowledgement>(body) {
        Ok(Acknowledgement {
            ok: Some(false),
            error,
        }) => Some(error.unwrap_or_else(|| "not acknowledged".to_string())),
        _ => None,
    }
}

/// Pull a human-readable message out of an error body
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Acknowledgement>(body) {
        Ok(Acknowledgement { error: Some(msg), .. }) => msg,
        _ if body.trim().is_empty() => "no response body".to_string(),
        _ => body.trim().to_string(),
    }
}
