//! Recipe ideas from ingredient names

use crate::api::ensure_success;
use crate::error::{PantryError, PantryResult};
use crate::intake::{extract_json_array, IntakeClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// One suggested recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIdea {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Ingredients the recipe needs that are not in stock
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// Reply of the recipe service
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeSuggestions {
    pub ideas: Vec<RecipeIdea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipeSuggestions {
    pub fn is_fallback(&self) -> bool {
        self.note.is_some() || self.error.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct IdeasBody {
    #[serde(default)]
    ideas: Vec<Value>,
    note: Option<String>,
    error: Option<String>,
}

/// Keep only well-formed ideas from a reply body.
///
/// Accepts `{ideas, note?, error?}` or a bare (possibly fenced) array.
pub fn parse_ideas(body: &str) -> RecipeSuggestions {
    let (raw, note, error) = match serde_json::from_str::<IdeasBody>(body) {
        Ok(parsed) => (parsed.ideas, parsed.note, parsed.error),
        Err(_) => (extract_json_array(body).unwrap_or_default(), None, None),
    };

    let ideas = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RecipeIdea>(value).ok())
        .collect();

    RecipeSuggestions { ideas, note, error }
}

/// Single catch-all idea used when the service returns nothing usable
pub fn fallback_ideas(names: &[String]) -> Vec<RecipeIdea> {
    vec![RecipeIdea {
        id: "fallback-1".to_string(),
        title: "Mixed Bowl".to_string(),
        ingredients: names.iter().take(3).cloned().collect(),
        steps: vec!["Combine ingredients".to_string(), "Season & serve".to_string()],
        missing: Vec::new(),
    }]
}

impl IntakeClient {
    /// Ask the recipe route for ideas using `names`
    pub async fn suggest_recipes(&self, names: &[String]) -> PantryResult<RecipeSuggestions> {
        let url = self.server.endpoint("/api/recipes");
        debug!("POST {} ({} ingredients)", url, names.len());

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "ingredients": names }))
            .send()
            .await
            .map_err(|e| PantryError::transport("recipes", e))?;
        let response = ensure_success("recipes", response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| PantryError::transport("recipes", e))?;

        let mut suggestions = parse_ideas(&text);
        if suggestions.ideas.is_empty() {
            warn!("recipe service returned no usable ideas, using local fallback");
            suggestions.ideas = fallback_ideas(names);
            suggestions.note.get_or_insert_with(|| "fallback used".to_string());
        }
        Ok(suggestions)
    }
}
