//! Storage layer for decks
//!
//! Decks are JSON files written atomically, with an optional backup of the
//! previous file taken before every save.

pub mod deck;
pub mod file_io;

pub use deck::{load_snapshot, DeckStorage, DeckStore};
pub use file_io::{read_deck_json, write_json_atomic};
