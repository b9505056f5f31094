//! Backup system for deck files
//!
//! Every time a deck is saved over an existing file, the previous file is
//! copied to the backup directory as `<deck>-YYYYMMDD-HHMMSS-mmm.json`.
//! Retention keeps the newest `keep_per_deck` copies of each deck.
//!
//! # Example
//!
//! ```rust,ignore
//! use leitner::backup::BackupManager;
//!
//! let manager = BackupManager::new(&paths, settings.backup_retention.clone());
//! manager.backup_with_retention(&paths.deck_file("spanish"))?;
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager};
