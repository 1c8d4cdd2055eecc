//! cliclack theme

use cliclack::ThemeState;
use console::Style;

/// Green accents for the pantry prompts
#[derive(Debug, Clone, Default)]
pub struct PantryTheme;

impl cliclack::Theme for PantryTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active | ThemeState::Submit => Style::new().green().dim(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().green(),
            ThemeState::Submit => Style::new().green().bold(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().yellow(),
        }
    }
}

pub fn init_theme() {
    cliclack::set_theme(PantryTheme);
}
