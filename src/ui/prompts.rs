//! Confirmation prompt with a non-interactive fallback

use super::context::UiContext;
use crate::error::{PantryError, PantryResult};

/// Ask a yes/no question.
///
/// `--yes` approves without asking; without a terminal the default wins.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> PantryResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    let answer = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message).initial_value(default).interact()
    })
    .await
    .map_err(|e| PantryError::Internal(format!("prompt task failed: {}", e)))?;

    answer.map_err(|e| PantryError::User(format!("Prompt failed: {}", e)))
}
