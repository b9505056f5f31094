//! Review history log
//!
//! Records every card addition and every review outcome in an append-only
//! JSON-lines file.
//!
//! - `HistoryEntry`: one event with timestamp, deck, question and box movement
//! - `HistoryLogger`: appends entries and reads them back
//!
//! # Example
//!
//! ```rust,ignore
//! use leitner::history::{HistoryEntry, HistoryLogger};
//!
//! let logger = HistoryLogger::new(paths.history_log());
//! let outcome = card.apply_review(true, today);
//! logger.log(&HistoryEntry::reviewed("spanish", card.question(), &outcome))?;
//! ```

mod entry;
mod logger;

pub use entry::{Event, HistoryEntry};
pub use logger::HistoryLogger;
