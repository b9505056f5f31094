//! History CLI command

use crate::config::paths::LeitnerPaths;
use crate::display::format_history;
use crate::error::LeitnerResult;

use super::history_logger;

/// Show the most recent history entries, optionally for one deck
pub fn handle_history_command(
    paths: &LeitnerPaths,
    limit: usize,
    deck: Option<&str>,
) -> LeitnerResult<()> {
    let logger = history_logger(paths);

    let entries = match deck {
        Some(deck) => {
            let matching: Vec<_> = logger
                .read_all()?
                .into_iter()
                .filter(|e| e.deck == deck)
                .collect();
            let start = matching.len().saturating_sub(limit);
            matching[start..].to_vec()
        }
        None => logger.read_recent(limit)?,
    };

    println!("{}", format_history(&entries).trim_end());
    Ok(())
}
