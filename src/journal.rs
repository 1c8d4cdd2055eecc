//! Sync journal
//!
//! Appends one JSON line per reconciliation outcome to
//! `~/.local/state/pantry/journal.log` when `general.journal` is on.

use crate::config::{Config, ConfigManager};
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// File-based journal of commits and rollbacks
#[derive(Debug)]
pub struct SyncJournal {
    enabled: bool,
    path: PathBuf,
}

impl SyncJournal {
    /// Create a journal from config
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.general.journal,
            path: ConfigManager::journal_path(),
        }
    }

    /// Create an enabled journal writing to `path`
    pub fn at(path: PathBuf) -> Self {
        Self {
            enabled: true,
            path,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Record an event as a JSON line.
    ///
    /// IO failures are logged and dropped; the journal never feeds back
    /// into inventory state.
    pub async fn record(&self, event: &str, data: &serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "data": data,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize journal event: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write journal {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}
