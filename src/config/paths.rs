//! Path management for the Leitner trainer
//!
//! Provides XDG-compliant path resolution for settings, deck files, backups and
//! the review history log.
//!
//! ## Path Resolution Order
//!
//! 1. `LEITNER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/leitner` or `~/.config/leitner`
//! 3. Windows: `%APPDATA%\leitner`

use std::path::PathBuf;

use crate::error::LeitnerError;

/// File extension used for deck files
pub const DECK_EXTENSION: &str = "json";

/// Manages all paths used by the trainer
#[derive(Debug, Clone)]
pub struct LeitnerPaths {
    /// Base directory for all Leitner data
    base_dir: PathBuf,
}

impl LeitnerPaths {
    /// Create a new LeitnerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LeitnerError> {
        let base_dir = if let Ok(custom) = std::env::var("LEITNER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LeitnerPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per deck
    pub fn decks_dir(&self) -> PathBuf {
        self.base_dir.join("decks")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Append-only review history (JSON lines)
    pub fn history_log(&self) -> PathBuf {
        self.base_dir.join("history.log")
    }

    /// Path of the deck file for a deck name
    pub fn deck_file(&self, name: &str) -> PathBuf {
        self.decks_dir().join(format!("{}.{}", name, DECK_EXTENSION))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LeitnerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LeitnerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.decks_dir())
            .map_err(|e| LeitnerError::Io(format!("Failed to create decks directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LeitnerError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if the trainer has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LeitnerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                LeitnerError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("leitner"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LeitnerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LeitnerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("leitner"))
}
