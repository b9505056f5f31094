//! Service layer
//!
//! Ties the scheduler, deck storage and history log together for the CLI.

pub mod study;

pub use study::{review_rng, AddCardOutcome, StudySession};
