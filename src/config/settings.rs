//! User settings for the Leitner trainer
//!
//! Manages the new-card quota, review shuffling and backup retention.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::LeitnerPaths;
use crate::error::LeitnerError;
use crate::storage::write_json_atomic;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of backups to keep per deck
    pub keep_per_deck: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep_per_deck: 10 }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How many new cards may be created per calendar day
    #[serde(default = "default_daily_new_card_limit")]
    pub daily_new_card_limit: u32,

    /// Fixed seed for the review shuffle; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Date format used when printing dates (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_daily_new_card_limit() -> u32 {
    10
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            daily_new_card_limit: default_daily_new_card_limit(),
            shuffle_seed: None,
            backup_retention: BackupRetention::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LeitnerPaths) -> Result<Self, LeitnerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LeitnerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LeitnerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Check values that serde accepts but the trainer cannot use
    pub fn validate(&self) -> Result<(), LeitnerError> {
        // Dates carry no time of day, so time specifiers fail to render too
        let sample = NaiveDate::MIN;
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(&self.date_format)).is_err() {
            return Err(LeitnerError::Config(format!(
                "date_format '{}' cannot format a calendar date",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LeitnerPaths) -> Result<(), LeitnerError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }
}
