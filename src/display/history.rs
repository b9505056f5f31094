//! History display formatting

use crate::history::HistoryEntry;

/// Format history entries, one per line
pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded yet.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
