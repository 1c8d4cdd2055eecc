//! Terminal output for the pantry CLI
//!
//! Interactive terminals get `cliclack` prompts and `indicatif` bars; pipes
//! and CI get plain prefixed lines so output stays greppable.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, remark, step_info, step_ok, step_ok_detail, step_warn,
    step_warn_hint,
};
pub use progress::{BatchProgress, TaskSpinner};
pub use prompts::confirm;
pub use theme::{init_theme, PantryTheme};
