//! Custom error types for the Leitner trainer
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Leitner operations
#[derive(Error, Debug)]
pub enum LeitnerError {
    /// Box number outside the 1..=7 range
    #[error("Invalid box {0}: boxes are numbered 1 to 7")]
    InvalidBox(i64),

    /// A stored card record is missing a field or holds an unusable value
    #[error("Malformed card record in box {box_key} at position {index}: {reason}")]
    MalformedRecord {
        box_key: String,
        index: usize,
        reason: String,
    },

    /// The deck file does not exist
    #[error("Deck file not found: {}", .0.display())]
    DeckNotFound(PathBuf),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity already exists
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LeitnerError {
    /// Create a "not found" error for decks referenced by name
    pub fn deck_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Deck",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::DeckNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidBox(_) | Self::MalformedRecord { .. }
        )
    }
}

impl From<std::io::Error> for LeitnerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LeitnerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Leitner operations
pub type LeitnerResult<T> = Result<T, LeitnerError>;
