//! Study CLI commands
//!
//! `due`, `status`, `review` and `study` all work on one deck for the current
//! day as reported by the clock.

use chrono::NaiveDate;

use crate::clock::{Clock, FixedClock};
use crate::config::paths::LeitnerPaths;
use crate::config::settings::Settings;
use crate::display::{format_boxes, format_due_list, format_review_summary, format_status};
use crate::error::{LeitnerError, LeitnerResult};
use crate::input::InputProvider;
use crate::services::{review_rng, StudySession};
use crate::storage::DeckStore;

use super::{deck_store, history_logger};

fn open_session(
    store: &DeckStore,
    deck: &str,
    clock: &dyn Clock,
    settings: &Settings,
) -> LeitnerResult<StudySession> {
    let path = store.deck_path(deck)?;
    StudySession::open(store, &path, clock, settings).map_err(|e| match e {
        LeitnerError::DeckNotFound(_) => LeitnerError::deck_not_found(deck.trim()),
        other => other,
    })
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> LeitnerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LeitnerError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", s))
    })
}

/// List the cards due today, or on `date`
pub fn handle_due_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    clock: &dyn Clock,
    deck: &str,
    date: Option<&str>,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);
    let on = match date {
        Some(d) => parse_date(d)?,
        None => clock.today(),
    };

    let session = open_session(&store, deck, &FixedClock(on), settings)?;
    println!(
        "{}",
        format_due_list(&session.due_cards(), on, &settings.date_format).trim_end()
    );
    Ok(())
}

/// Show per-box counts for a deck
pub fn handle_status_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    clock: &dyn Clock,
    deck: &str,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);
    let session = open_session(&store, deck, clock, settings)?;

    print!(
        "{}",
        format_status(
            session.deck_name(),
            session.scheduler(),
            session.today(),
            session.quota()
        )
    );
    Ok(())
}

/// Review the cards due today and save the deck
pub fn handle_review_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    clock: &dyn Clock,
    input: &mut dyn InputProvider,
    deck: &str,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);
    let mut session =
        open_session(&store, deck, clock, settings)?.with_history(history_logger(paths));

    let mut rng = review_rng(settings);
    let summary = session.review_with_input(input, &mut rng)?;
    if summary.total() > 0 {
        session.save(&store)?;
    }

    println!("{}", format_review_summary(&summary));
    Ok(())
}

/// Full study flow: show boxes, add cards, review, save
pub fn handle_study_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    clock: &dyn Clock,
    input: &mut dyn InputProvider,
    deck: &str,
) -> LeitnerResult<()> {
    let store = deck_store(paths, settings);
    let path = store.deck_path(deck)?;
    let mut session = StudySession::open_or_create(&store, &path, clock, settings)?
        .with_history(history_logger(paths));

    print!("{}", format_boxes(session.scheduler(), &settings.date_format));

    let added = session.add_cards_interactively(input)?;
    if added > 0 {
        println!("Added {} card(s).", added);
    }

    let mut rng = review_rng(settings);
    let summary = session.review_with_input(input, &mut rng)?;
    println!("{}", format_review_summary(&summary));

    session.save(&store)?;
    Ok(())
}
