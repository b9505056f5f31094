//! Deck CLI commands

use clap::Subcommand;

use crate::config::paths::LeitnerPaths;
use crate::config::settings::Settings;
use crate::display::{format_boxes, format_deck_list};
use crate::error::LeitnerResult;

use super::deck_store;

/// Deck subcommands
#[derive(Subcommand)]
pub enum DeckCommands {
    /// List all decks
    List,
    /// Create a new, empty deck
    Create {
        /// Deck name (letters, digits, '-' or '_')
        name: String,
    },
    /// Show the cards in each box
    Show {
        /// Deck name
        name: String,
    },
}

/// Handle a deck command
pub fn handle_deck_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    cmd: DeckCommands,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);

    match cmd {
        DeckCommands::List => {
            let names = store.list_decks()?;
            println!("{}", format_deck_list(&names).trim_end());
        }
        DeckCommands::Create { name } => {
            let path = store.create_deck(&name)?;
            println!("Created deck '{}' at {}", name.trim(), path.display());
        }
        DeckCommands::Show { name } => {
            let scheduler = store.load_deck(&name)?;
            print!("{}", format_boxes(&scheduler, &settings.date_format));
        }
    }

    Ok(())
}
