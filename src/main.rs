use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use leitner::cli::{
    handle_backup_command, handle_card_command, handle_deck_command, handle_due_command,
    handle_history_command, handle_review_command, handle_status_command, handle_study_command,
};
use leitner::clock::SystemClock;
use leitner::config::{paths::LeitnerPaths, settings::Settings};
use leitner::input::ConsoleInput;

#[derive(Parser)]
#[command(
    name = "leitner",
    version,
    about = "Leitner box flashcards for the terminal",
    long_about = "Leitner keeps flashcards in seven boxes. Cards you answer \
                  correctly move to a box reviewed less often; cards you miss \
                  go back to box 1 and come up again tomorrow."
)]
struct Cli {
    /// Data directory (defaults to ~/.config/leitner)
    #[arg(long, global = true, env = "LEITNER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Deck management commands
    #[command(subcommand)]
    Deck(leitner::cli::DeckCommands),

    /// Card management commands
    #[command(subcommand)]
    Card(leitner::cli::CardCommands),

    /// List cards due for review
    Due {
        /// Deck name
        deck: String,
        /// Check a different day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Review today's due cards
    Review {
        /// Deck name
        deck: String,
    },

    /// Show boxes, add new cards, then review (creates the deck if needed)
    Study {
        /// Deck name
        deck: String,
    },

    /// Show per-box counts for a deck
    Status {
        /// Deck name
        deck: String,
    },

    /// Show recent card additions and reviews
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show one deck
        #[arg(short, long)]
        deck: Option<String>,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(leitner::cli::BackupCommands),
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LeitnerPaths::with_base_dir(dir),
        None => LeitnerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let clock = SystemClock;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Leitner is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing Leitner at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Create a deck with 'leitner deck create <name>'");
            println!("or start studying right away with 'leitner study <name>'.");
        }
        Some(Commands::Config) => {
            println!("Leitner Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Deck directory:   {}", paths.decks_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("History log:      {}", paths.history_log().display());
            println!();
            println!("Settings:");
            println!("  New cards per day: {}", settings.daily_new_card_limit);
            match settings.shuffle_seed {
                Some(seed) => println!("  Shuffle seed:      {}", seed),
                None => println!("  Shuffle seed:      (random)"),
            }
            println!(
                "  Backups per deck:  {}",
                settings.backup_retention.keep_per_deck
            );
            println!("  Date format:       {}", settings.date_format);
        }
        Some(Commands::Deck(cmd)) => {
            paths.ensure_directories()?;
            handle_deck_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Card(cmd)) => {
            handle_card_command(&paths, &settings, &clock, cmd)?;
        }
        Some(Commands::Due { deck, date }) => {
            handle_due_command(&paths, &settings, &clock, &deck, date.as_deref())?;
        }
        Some(Commands::Review { deck }) => {
            let mut input = ConsoleInput::stdio();
            handle_review_command(&paths, &settings, &clock, &mut input, &deck)?;
        }
        Some(Commands::Study { deck }) => {
            paths.ensure_directories()?;
            let mut input = ConsoleInput::stdio();
            handle_study_command(&paths, &settings, &clock, &mut input, &deck)?;
        }
        Some(Commands::Status { deck }) => {
            handle_status_command(&paths, &settings, &clock, &deck)?;
        }
        Some(Commands::History { limit, deck }) => {
            handle_history_command(&paths, limit, deck.as_deref())?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        None => {
            println!("Leitner - flashcards in seven boxes");
            println!();
            println!("Run 'leitner --help' for usage information.");
            println!("Run 'leitner study <deck>' to start a session.");
        }
    }

    Ok(())
}
