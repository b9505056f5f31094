//! Display formatting for terminal output
//!
//! Formatting functions return strings; the CLI decides where they go.

pub mod deck;
pub mod history;

pub use deck::{
    format_boxes, format_date, format_deck_list, format_due_list, format_review_summary, format_status,
};
pub use history::format_history;
