//! Flashcard model
//!
//! A card carries its question and answer plus the scheduling metadata the
//! Leitner scheduler works from: current box and the dates of creation, last
//! failure and last review.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::box_number::BoxNumber;
use crate::error::{LeitnerError, LeitnerResult};

/// A single flashcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    question: String,
    answer: String,
    box_number: BoxNumber,
    created_date: NaiveDate,
    last_failed_date: NaiveDate,
    last_answered_date: NaiveDate,
}

/// Persisted form of a card
///
/// Older deck files lack the two trailing dates; they default to
/// `created_date` when the record is turned back into a [`Card`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub question: String,
    pub answer: String,
    #[serde(rename = "box")]
    pub box_number: i64,
    pub created_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_failed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_answered_date: Option<NaiveDate>,
}

/// Result of applying one review to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub correct: bool,
    pub previous_box: BoxNumber,
    pub new_box: BoxNumber,
    pub review_date: NaiveDate,
}

impl ReviewOutcome {
    pub fn was_promoted(&self) -> bool {
        self.new_box > self.previous_box
    }
}

impl Card {
    /// Create a new card in box 1
    pub fn new(question: impl Into<String>, answer: impl Into<String>, created_date: NaiveDate) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            box_number: BoxNumber::FIRST,
            created_date,
            last_failed_date: created_date,
            last_answered_date: created_date,
        }
    }

    /// Create a new card placed directly in a given box
    pub fn in_box(
        question: impl Into<String>,
        answer: impl Into<String>,
        box_number: BoxNumber,
        created_date: NaiveDate,
    ) -> Self {
        Self::new(question, answer, created_date).placed_in(box_number)
    }

    /// Same card filed under another box, used when a card is first placed
    pub fn placed_in(mut self, box_number: BoxNumber) -> Self {
        self.box_number = box_number;
        self
    }

    /// Rebuild a card from its persisted record
    pub fn from_record(record: CardRecord) -> LeitnerResult<Self> {
        let box_number = BoxNumber::new(record.box_number)?;
        if record.question.trim().is_empty() {
            return Err(LeitnerError::Validation("Card question cannot be empty".into()));
        }

        Ok(Self {
            question: record.question,
            answer: record.answer,
            box_number,
            created_date: record.created_date,
            last_failed_date: record.last_failed_date.unwrap_or(record.created_date),
            last_answered_date: record.last_answered_date.unwrap_or(record.created_date),
        })
    }

    /// Persisted form of this card, with every field present
    pub fn to_record(&self) -> CardRecord {
        CardRecord {
            question: self.question.clone(),
            answer: self.answer.clone(),
            box_number: self.box_number.into(),
            created_date: self.created_date,
            last_failed_date: Some(self.last_failed_date),
            last_answered_date: Some(self.last_answered_date),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn box_number(&self) -> BoxNumber {
        self.box_number
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn last_failed_date(&self) -> NaiveDate {
        self.last_failed_date
    }

    pub fn last_answered_date(&self) -> NaiveDate {
        self.last_answered_date
    }

    /// Date the card becomes due: last review plus its box delay
    pub fn next_review_date(&self) -> NaiveDate {
        self.last_answered_date + Duration::days(self.box_number.delay_days())
    }

    pub fn is_due(&self, reference_date: NaiveDate) -> bool {
        self.next_review_date() <= reference_date
    }

    /// Case-insensitive answer check, ignoring surrounding whitespace
    pub fn matches_answer(&self, response: &str) -> bool {
        response.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }

    /// Validate user-supplied content
    pub fn validate(&self) -> LeitnerResult<()> {
        if self.question.trim().is_empty() {
            return Err(LeitnerError::Validation("Card question cannot be empty".into()));
        }
        if self.answer.trim().is_empty() {
            return Err(LeitnerError::Validation("Card answer cannot be empty".into()));
        }
        Ok(())
    }

    /// Apply a review result. This is the only place a card changes box.
    ///
    /// A correct answer moves the card up one box (staying in box 7). A wrong
    /// answer sends it back to box 1 and records the failure date.
    pub fn apply_review(&mut self, correct: bool, review_date: NaiveDate) -> ReviewOutcome {
        let previous_box = self.box_number;

        if correct {
            self.box_number = previous_box.promoted();
        } else {
            self.box_number = BoxNumber::FIRST;
            self.last_failed_date = review_date;
        }
        self.last_answered_date = review_date;

        ReviewOutcome {
            correct,
            previous_box,
            new_box: self.box_number,
            review_date,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question)
    }
}
