//! Card CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::paths::LeitnerPaths;
use crate::config::settings::Settings;
use crate::error::{LeitnerError, LeitnerResult};
use crate::services::{AddCardOutcome, StudySession};

use super::{deck_store, history_logger};

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a card to box 1 of a deck
    Add {
        /// Deck name
        deck: String,
        /// Question side
        question: String,
        /// Answer side
        answer: String,
    },
}

/// Handle a card command
pub fn handle_card_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: CardCommands,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);

    match cmd {
        CardCommands::Add {
            deck,
            question,
            answer,
        } => {
            let path = store.deck_path(&deck)?;
            let mut session = StudySession::open(&store, &path, clock, settings)
                .map_err(|e| match e {
                    LeitnerError::DeckNotFound(_) => LeitnerError::deck_not_found(&deck),
                    other => other,
                })?
                .with_history(history_logger(paths));

            match session.add_card(&question, &answer)? {
                AddCardOutcome::Added(_) => {
                    session.save(&store)?;
                    println!("Added card to '{}': {}", session.deck_name(), question.trim());
                    println!(
                        "New cards left today: {}",
                        session.quota().remaining()
                    );
                }
                AddCardOutcome::QuotaReached => {
                    println!(
                        "Daily limit of {} new cards reached. Try again tomorrow.",
                        session.quota().limit()
                    );
                }
            }
        }
    }

    Ok(())
}
