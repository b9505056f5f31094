//! History entry data structures

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BoxNumber, Card, ReviewOutcome};

/// What happened to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// Card was created
    Added,
    /// Card was answered during a review
    Reviewed,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Added => write!(f, "ADDED"),
            Event::Reviewed => write!(f, "REVIEWED"),
        }
    }
}

/// A single history log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the entry was written (UTC)
    pub timestamp: DateTime<Utc>,

    pub event: Event,

    /// Deck name
    pub deck: String,

    pub question: String,

    /// Calendar date the event counts for
    pub date: NaiveDate,

    /// Box before a review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_before: Option<BoxNumber>,

    /// Box after the event
    pub box_after: BoxNumber,

    /// Whether a review was answered correctly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl HistoryEntry {
    pub fn added(deck: impl Into<String>, card: &Card) -> Self {
        Self {
            timestamp: Utc::now(),
            event: Event::Added,
            deck: deck.into(),
            question: card.question().to_string(),
            date: card.created_date(),
            box_before: None,
            box_after: card.box_number(),
            correct: None,
        }
    }

    pub fn reviewed(deck: impl Into<String>, question: impl Into<String>, outcome: &ReviewOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            event: Event::Reviewed,
            deck: deck.into(),
            question: question.into(),
            date: outcome.review_date,
            box_before: Some(outcome.previous_box),
            box_after: outcome.new_box,
            correct: Some(outcome.correct),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event,
            self.deck,
            self.question
        );

        match (self.box_before, self.correct) {
            (Some(before), Some(correct)) => output.push_str(&format!(
                " ({}, box {} -> {})",
                if correct { "correct" } else { "incorrect" },
                before,
                self.box_after
            )),
            _ => output.push_str(&format!(" (box {})", self.box_after)),
        }

        output
    }
}
