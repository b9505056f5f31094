//! Core data models for the Leitner trainer

pub mod box_number;
pub mod card;

pub use box_number::BoxNumber;
pub use card::{Card, CardRecord, ReviewOutcome};
