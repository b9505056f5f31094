//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod card;
pub mod deck;
pub mod history;
pub mod review;

pub use backup::{handle_backup_command, BackupCommands};
pub use card::{handle_card_command, CardCommands};
pub use deck::{handle_deck_command, DeckCommands};
pub use history::handle_history_command;
pub use review::{
    handle_due_command, handle_review_command, handle_status_command, handle_study_command,
};

use crate::backup::BackupManager;
use crate::config::paths::LeitnerPaths;
use crate::config::settings::Settings;
use crate::history::HistoryLogger;
use crate::storage::DeckStore;

/// Deck store that backs up each deck before overwriting it
pub fn deck_store(paths: &LeitnerPaths, settings: &Settings) -> DeckStore {
    let backups = BackupManager::new(paths, settings.backup_retention.clone());
    DeckStore::new(paths.clone()).with_backups(backups)
}

pub fn history_logger(paths: &LeitnerPaths) -> HistoryLogger {
    HistoryLogger::new(paths.history_log())
}
