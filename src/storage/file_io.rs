//! Reading and atomically replacing JSON files
//!
//! Deck and settings files are rewritten whole on every save. Writes go to a
//! sibling `.tmp` file that is synced and renamed over the target, so a crash
//! leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LeitnerError, LeitnerResult};

/// Parse a deck file
///
/// A missing file is [`LeitnerError::DeckNotFound`]; unparseable contents are
/// [`LeitnerError::Storage`] naming the file.
pub fn read_deck_json<T: DeserializeOwned>(path: &Path) -> LeitnerResult<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LeitnerError::DeckNotFound(path.to_path_buf()),
        _ => LeitnerError::Io(format!("Failed to open {}: {}", path.display(), e)),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        LeitnerError::Storage(format!("{} is not valid JSON: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> LeitnerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LeitnerError::Storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = write_synced(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LeitnerError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}

// Same directory as the target, or the rename is not atomic
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced<T: Serialize>(temp_path: &Path, data: &T) -> LeitnerResult<()> {
    let file = File::create(temp_path)
        .map_err(|e| LeitnerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| LeitnerError::Storage(format!("Failed to flush temp file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn empty_deck() -> Value {
        json!({"boxes": {"1": [], "2": [], "3": [], "4": [], "5": [], "6": [], "7": []}})
    }

    #[test]
    fn test_write_then_read_deck() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("spanish.json");

        write_json_atomic(&path, &empty_deck()).unwrap();
        let loaded: Value = read_deck_json(&path).unwrap();
        assert_eq!(loaded, empty_deck());
    }

    #[test]
    fn test_rewrite_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("spanish.json");

        write_json_atomic(&path, &json!({"boxes": {}})).unwrap();
        write_json_atomic(&path, &empty_deck()).unwrap();

        assert!(!temp_dir.path().join("spanish.json.tmp").exists());
        let loaded: Value = read_deck_json(&path).unwrap();
        assert_eq!(loaded["boxes"].as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_write_creates_decks_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("decks").join("kanji.json");

        write_json_atomic(&path, &empty_deck()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_missing_deck_file_is_deck_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        match read_deck_json::<Value>(&path) {
            Err(LeitnerError::DeckNotFound(missing)) => assert_eq!(missing, path),
            other => panic!("expected DeckNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_garbled_deck_file_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbled.json");
        fs::write(&path, "{\"boxes\": [").unwrap();

        let err = read_deck_json::<Value>(&path).unwrap_err();
        assert!(matches!(err, LeitnerError::Storage(_)));
        assert!(err.to_string().contains("garbled.json"));
    }
}
