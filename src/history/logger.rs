//! Append-only history logger
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{LeitnerError, LeitnerResult};

use super::entry::HistoryEntry;

/// Writes history entries to a JSON-lines file
#[derive(Debug, Clone)]
pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> LeitnerResult<File> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LeitnerError::Io(format!("Failed to open history log: {}", e)))
    }

    /// Append one entry
    pub fn log(&self, entry: &HistoryEntry) -> LeitnerResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[HistoryEntry]) -> LeitnerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                LeitnerError::Json(format!("Failed to serialize history entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| LeitnerError::Io(format!("Failed to write history entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| LeitnerError::Io(format!("Failed to flush history log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> LeitnerResult<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| LeitnerError::Io(format!("Failed to open history log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                LeitnerError::Io(format!("Failed to read history line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: HistoryEntry = serde_json::from_str(&line).map_err(|e| {
                LeitnerError::Json(format!(
                    "Failed to parse history entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries
    pub fn read_recent(&self, count: usize) -> LeitnerResult<Vec<HistoryEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn entry_count(&self) -> LeitnerResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Card;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_logger() -> (HistoryLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = HistoryLogger::new(temp_dir.path().join("history.log"));
        (logger, temp_dir)
    }

    fn added(question: &str) -> HistoryEntry {
        let card = Card::new(question, "a", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        HistoryEntry::added("deck", &card)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger.log(&added("first")).unwrap();
        logger.log(&added("second")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "first");
        assert_eq!(logger.entry_count().unwrap(), 2);
    }

    #[test]
    fn test_log_batch() {
        let (logger, _temp) = create_test_logger();

        let entries: Vec<_> = (0..3).map(|i| added(&format!("q{}", i))).collect();
        logger.log_batch(&entries).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            logger.log(&added(&format!("q{}", i))).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let questions: Vec<_> = recent.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["q7", "q8", "q9"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&added("kept")).unwrap();

        let reopened = HistoryLogger::new(temp.path().join("history.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }
}
