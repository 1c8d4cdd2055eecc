//! Spinners and progress bars with a plain fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner around a single network round trip
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }

    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

/// Bar over a batch of mutations, e.g. receipt items being stored.
///
/// In plain mode each settled item prints one line instead.
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    pub fn new(ctx: &UiContext, label: &str, total: u64) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total);
            let bar_style = ProgressStyle::default_bar()
                .template("  {spinner:.green} {prefix}  {bar:24.green/dim} {pos}/{len} {msg:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("━╸─");
            bar.set_style(bar_style);
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            println!("{} ({} items)...", label, total);
            None
        };
        Self { bar }
    }

    /// Record one settled item
    pub fn settle(&self, name: &str, ok: bool) {
        match &self.bar {
            Some(bar) => {
                bar.inc(1);
                bar.set_message(name.to_string());
            }
            None if ok => println!("  {} {}", style("[OK]").green(), name),
            None => println!("  {} {}", style("[FAIL]").red(), name),
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}
