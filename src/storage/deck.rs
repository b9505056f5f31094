//! Deck files
//!
//! A deck is stored as one JSON snapshot of all seven boxes:
//!
//! ```json
//! { "boxes": { "1": [CardRecord, ...], "2": [], ..., "7": [] } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::file_io::{read_deck_json, write_json_atomic};
use crate::backup::BackupManager;
use crate::config::paths::{LeitnerPaths, DECK_EXTENSION};
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxNumber, Card, CardRecord};
use crate::scheduler::Scheduler;

#[derive(Debug, Serialize, Deserialize)]
struct DeckSnapshot<T> {
    boxes: BTreeMap<String, Vec<T>>,
}

/// Loads and saves a scheduler's cards
pub trait DeckStorage {
    /// Load a deck; a missing file is [`LeitnerError::DeckNotFound`]
    fn load(&self, path: &Path) -> LeitnerResult<Scheduler>;

    /// Write the full deck state, replacing the file
    fn save(&self, path: &Path, scheduler: &Scheduler) -> LeitnerResult<()>;
}

/// Deck files in the decks directory, with optional backups on save
pub struct DeckStore {
    paths: LeitnerPaths,
    backups: Option<BackupManager>,
}

impl DeckStore {
    pub fn new(paths: LeitnerPaths) -> Self {
        Self {
            paths,
            backups: None,
        }
    }

    /// Back up existing deck files before each save
    pub fn with_backups(mut self, backups: BackupManager) -> Self {
        self.backups = Some(backups);
        self
    }

    pub fn paths(&self) -> &LeitnerPaths {
        &self.paths
    }

    /// Path of a deck by name
    pub fn deck_path(&self, name: &str) -> LeitnerResult<PathBuf> {
        validate_deck_name(name)?;
        Ok(self.paths.deck_file(name.trim()))
    }

    pub fn deck_exists(&self, name: &str) -> LeitnerResult<bool> {
        Ok(self.deck_path(name)?.exists())
    }

    /// Names of all decks, sorted
    pub fn list_decks(&self) -> LeitnerResult<Vec<String>> {
        let dir = self.paths.decks_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)
            .map_err(|e| LeitnerError::Io(format!("Failed to read decks directory: {}", e)))?
        {
            let path = entry
                .map_err(|e| LeitnerError::Io(format!("Failed to read directory entry: {}", e)))?
                .path();

            if path.extension().map_or(false, |ext| ext == DECK_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Create an empty deck file
    pub fn create_deck(&self, name: &str) -> LeitnerResult<PathBuf> {
        let path = self.deck_path(name)?;
        if path.exists() {
            return Err(LeitnerError::Duplicate {
                entity_type: "Deck",
                identifier: name.trim().to_string(),
            });
        }

        self.save(&path, &Scheduler::new())?;
        Ok(path)
    }

    /// Load a deck by name
    pub fn load_deck(&self, name: &str) -> LeitnerResult<Scheduler> {
        let path = self.deck_path(name)?;
        self.load(&path).map_err(|e| match e {
            LeitnerError::DeckNotFound(_) => LeitnerError::deck_not_found(name.trim()),
            other => other,
        })
    }
}

impl DeckStorage for DeckStore {
    fn load(&self, path: &Path) -> LeitnerResult<Scheduler> {
        let scheduler = load_snapshot(path)?;
        log::debug!("Loaded {} cards from {}", scheduler.len(), path.display());
        Ok(scheduler)
    }

    fn save(&self, path: &Path, scheduler: &Scheduler) -> LeitnerResult<()> {
        if let Some(backups) = &self.backups {
            if let Err(e) = backups.backup_with_retention(path) {
                log::warn!("Skipping backup of {}: {}", path.display(), e);
            }
        }

        write_json_atomic(path, &encode_snapshot(scheduler))?;
        log::debug!("Saved {} cards to {}", scheduler.len(), path.display());
        Ok(())
    }
}

/// Read and decode a deck snapshot file, record by record
pub fn load_snapshot(path: &Path) -> LeitnerResult<Scheduler> {
    let snapshot: DeckSnapshot<serde_json::Value> = read_deck_json(path)?;
    decode_snapshot(snapshot)
}

fn validate_deck_name(name: &str) -> LeitnerResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeitnerError::Validation("Deck name cannot be empty".into()));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(LeitnerError::Validation(format!(
            "Invalid deck name '{}': use letters, digits, '-' or '_'",
            name
        )));
    }
    Ok(())
}

fn encode_snapshot(scheduler: &Scheduler) -> DeckSnapshot<CardRecord> {
    let boxes = BoxNumber::all()
        .map(|box_number| {
            let records = scheduler
                .cards()
                .iter()
                .filter(|card| card.box_number() == box_number)
                .map(Card::to_record)
                .collect();
            (box_number.to_string(), records)
        })
        .collect();

    DeckSnapshot { boxes }
}

fn decode_snapshot(snapshot: DeckSnapshot<serde_json::Value>) -> LeitnerResult<Scheduler> {
    let mut scheduler = Scheduler::new();

    for (box_key, values) in snapshot.boxes {
        let filed_under = parse_box_key(&box_key)?;

        for (index, value) in values.into_iter().enumerate() {
            let malformed = |reason: String| LeitnerError::MalformedRecord {
                box_key: box_key.clone(),
                index,
                reason,
            };

            let record: CardRecord =
                serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
            let card = Card::from_record(record).map_err(|e| match e {
                LeitnerError::Validation(reason) => malformed(reason),
                other => other,
            })?;

            if card.box_number() != filed_under {
                log::warn!(
                    "Card '{}' is filed under box {} but records box {}; using box {}",
                    card.question(),
                    filed_under,
                    card.box_number(),
                    card.box_number()
                );
            }

            let box_number = i64::from(card.box_number());
            scheduler.add_card(card, box_number)?;
        }
    }

    Ok(scheduler)
}

fn parse_box_key(box_key: &str) -> LeitnerResult<BoxNumber> {
    let number: i64 = box_key.trim().parse().map_err(|_| LeitnerError::MalformedRecord {
        box_key: box_key.to_string(),
        index: 0,
        reason: "box key is not a number".into(),
    })?;
    BoxNumber::new(number)
}
