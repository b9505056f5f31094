//! Deck backup manager
//!
//! Copies a deck file aside before it is overwritten and keeps only the newest
//! backups for each deck.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::LeitnerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LeitnerError, LeitnerResult};
use crate::storage::load_snapshot;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Deck the backup was taken from
    pub deck: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation, retention and restore
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: &LeitnerPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Copy a deck file into the backup directory
    ///
    /// Returns `None` when the deck file does not exist yet.
    pub fn backup_deck(&self, deck_file: &Path) -> LeitnerResult<Option<PathBuf>> {
        if !deck_file.exists() {
            return Ok(None);
        }

        let deck = deck_name(deck_file)?;
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LeitnerError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}-{}-{:03}.json",
            deck,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(filename);

        fs::copy(deck_file, &backup_path)
            .map_err(|e| LeitnerError::Io(format!("Failed to write backup file: {}", e)))?;

        Ok(Some(backup_path))
    }

    /// Back up a deck and prune its old backups
    pub fn backup_with_retention(&self, deck_file: &Path) -> LeitnerResult<Option<PathBuf>> {
        let created = self.backup_deck(deck_file)?;
        if created.is_some() {
            self.enforce_retention(&deck_name(deck_file)?)?;
        }
        Ok(created)
    }

    /// List backups, newest first, optionally for a single deck
    pub fn list_backups(&self, deck: Option<&str>) -> LeitnerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LeitnerError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LeitnerError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    if deck.map_or(true, |d| d == info.deck) {
                        backups.push(info);
                    }
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete all but the newest backups of a deck
    pub fn enforce_retention(&self, deck: &str) -> LeitnerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self
            .list_backups(Some(deck))?
            .into_iter()
            .skip(self.retention.keep_per_deck as usize)
        {
            fs::remove_file(&backup.path).map_err(|e| {
                LeitnerError::Io(format!("Failed to delete old backup: {}", e))
            })?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Look up a backup by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            parse_backup_info(&path)
        } else {
            None
        }
    }

    /// Replace a deck file with one of its backups
    ///
    /// The current deck file is itself backed up first. Returns the path of
    /// the restored deck.
    pub fn restore(&self, filename: &str, paths: &LeitnerPaths) -> LeitnerResult<PathBuf> {
        let info = self
            .get_backup(filename)
            .ok_or_else(|| LeitnerError::backup_not_found(filename))?;

        let cards = load_snapshot(&info.path).map_err(|e| {
            LeitnerError::Validation(format!("Backup {} is not a valid deck: {}", info.filename, e))
        })?;
        log::debug!("Restoring {} cards from {}", cards.len(), info.filename);

        let target = paths.deck_file(&info.deck);
        self.backup_deck(&target)?;

        fs::create_dir_all(paths.decks_dir())?;
        fs::copy(&info.path, &target)
            .map_err(|e| LeitnerError::Io(format!("Failed to restore backup: {}", e)))?;

        Ok(target)
    }
}

fn deck_name(deck_file: &Path) -> LeitnerResult<String> {
    deck_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| {
            LeitnerError::Validation(format!("Not a deck file: {}", deck_file.display()))
        })
}

/// Parse `<deck>-YYYYMMDD-HHMMSS-mmm.json`
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stem = filename.strip_suffix(".json")?;

    let mut parts = stem.rsplitn(4, '-');
    let millis = parts.next()?;
    let time_part = parts.next()?;
    let date_part = parts.next()?;
    let deck = parts.next()?;

    if deck.is_empty() {
        return None;
    }

    let created_at = parse_backup_timestamp(date_part, time_part, millis)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename: filename.clone(),
        deck: deck.to_string(),
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

fn parse_backup_timestamp(date_part: &str, time_part: &str, millis: &str) -> Option<DateTime<Utc>> {
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part.get(0..4)?.parse().ok()?;
    let month: u32 = date_part.get(4..6)?.parse().ok()?;
    let day: u32 = date_part.get(6..8)?.parse().ok()?;
    let hour: u32 = time_part.get(0..2)?.parse().ok()?;
    let minute: u32 = time_part.get(2..4)?.parse().ok()?;
    let second: u32 = time_part.get(4..6)?.parse().ok()?;
    let millis: u32 = millis.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        chrono::NaiveDateTime::new(date, time),
        Utc,
    ))
}
