//! Leitner - spaced-repetition flashcards in the terminal
//!
//! This library implements a Leitner box scheduler. Cards move through seven
//! boxes with review delays of 1, 2, 4, 7, 15, 30 and 60 days: a correct
//! answer promotes a card one box, a wrong answer sends it back to box 1.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Cards and box numbers
//! - `scheduler`: Box partition, due-card selection, review sessions, quota
//! - `storage`: JSON deck files
//! - `services`: Study sessions tying the pieces together
//! - `history`: Review history log
//! - `backup`: Deck backups
//! - `clock`, `input`: Injected date source and learner input
//!
//! # Example
//!
//! ```rust,ignore
//! use leitner::config::{paths::LeitnerPaths, settings::Settings};
//!
//! let paths = LeitnerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod input;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod storage;

pub use error::LeitnerError;
