//! Study session service
//!
//! A [`StudySession`] holds one open deck for the length of a command: the
//! scheduler, today's date and the remaining new-card quota. It is the only
//! place where cards are created or reviewed on behalf of the CLI.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::error::{LeitnerError, LeitnerResult};
use crate::history::{HistoryEntry, HistoryLogger};
use crate::input::{InputProvider, PromptedAnswers};
use crate::models::Card;
use crate::scheduler::{AnswerProvider, CardKey, NewCardQuota, ReviewSummary, Scheduler};
use crate::storage::DeckStorage;

/// Result of trying to add a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddCardOutcome {
    Added(CardKey),
    /// Today's new-card limit is used up; nothing was added
    QuotaReached,
}

/// One open deck and today's study state
pub struct StudySession {
    deck_name: String,
    deck_path: PathBuf,
    scheduler: Scheduler,
    quota: NewCardQuota,
    today: NaiveDate,
    history: Option<HistoryLogger>,
    /// Entries written to the history log once the deck is saved
    pending_history: Vec<HistoryEntry>,
}

impl StudySession {
    /// Open an existing deck
    pub fn open(
        storage: &dyn DeckStorage,
        deck_path: &Path,
        clock: &dyn Clock,
        settings: &Settings,
    ) -> LeitnerResult<Self> {
        let scheduler = storage.load(deck_path)?;
        Ok(Self::from_scheduler(scheduler, deck_path, clock.today(), settings))
    }

    /// Open a deck, starting an empty one when the file does not exist yet
    pub fn open_or_create(
        storage: &dyn DeckStorage,
        deck_path: &Path,
        clock: &dyn Clock,
        settings: &Settings,
    ) -> LeitnerResult<Self> {
        let scheduler = match storage.load(deck_path) {
            Ok(scheduler) => scheduler,
            Err(LeitnerError::DeckNotFound(_)) => {
                log::info!("Starting new deck at {}", deck_path.display());
                Scheduler::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_scheduler(scheduler, deck_path, clock.today(), settings))
    }

    fn from_scheduler(
        scheduler: Scheduler,
        deck_path: &Path,
        today: NaiveDate,
        settings: &Settings,
    ) -> Self {
        let deck_name = deck_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let quota = NewCardQuota::for_day(&scheduler, today, settings.daily_new_card_limit);

        Self {
            deck_name,
            deck_path: deck_path.to_path_buf(),
            scheduler,
            quota,
            today,
            history: None,
            pending_history: Vec::new(),
        }
    }

    /// Record additions and reviews in the history log when the deck is saved
    pub fn with_history(mut self, history: HistoryLogger) -> Self {
        self.history = Some(history);
        self
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn deck_path(&self) -> &Path {
        &self.deck_path
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn quota(&self) -> NewCardQuota {
        self.quota
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Add a new card to box 1, dated today
    pub fn add_card(&mut self, question: &str, answer: &str) -> LeitnerResult<AddCardOutcome> {
        if self.quota.is_exhausted() {
            return Ok(AddCardOutcome::QuotaReached);
        }

        let card = Card::new(question.trim(), answer.trim(), self.today);
        card.validate()?;

        if self.scheduler.find_by_question(card.question()).is_some() {
            return Err(LeitnerError::Duplicate {
                entity_type: "Card",
                identifier: card.question().to_string(),
            });
        }

        if self.history.is_some() {
            self.pending_history
                .push(HistoryEntry::added(&self.deck_name, &card));
        }

        let key = self.scheduler.add_card(card, 1)?;
        self.quota.record_addition();
        Ok(AddCardOutcome::Added(key))
    }

    /// Ask the learner for new cards until they decline or the quota runs out
    ///
    /// Returns the number of cards added.
    pub fn add_cards_interactively(&mut self, input: &mut dyn InputProvider) -> LeitnerResult<usize> {
        let mut added = 0;

        loop {
            if self.quota.is_exhausted() {
                input.show(&format!(
                    "Daily limit of {} new cards reached.",
                    self.quota.limit()
                ))?;
                break;
            }

            if !input.ask_yes_no("Do you want to add a new card?")? {
                break;
            }

            let question = input.ask_text("Question: ")?;
            let answer = input.ask_text("Answer: ")?;

            match self.add_card(&question, &answer) {
                Ok(AddCardOutcome::Added(_)) => added += 1,
                Ok(AddCardOutcome::QuotaReached) => continue,
                Err(e @ LeitnerError::Duplicate { .. }) => input.show(&e.to_string())?,
                Err(e) if e.is_validation() => input.show(&e.to_string())?,
                Err(e) => return Err(e),
            }
        }

        Ok(added)
    }

    /// Cards due today
    pub fn due_cards(&self) -> Vec<&Card> {
        self.scheduler.due_cards(self.today)
    }

    /// Review every card due today
    pub fn review<R: Rng + ?Sized>(
        &mut self,
        answers: &mut dyn AnswerProvider,
        rng: &mut R,
    ) -> LeitnerResult<ReviewSummary> {
        let due = self.scheduler.due_today(self.today);
        let summary = self
            .scheduler
            .review_session(&due, answers, rng, self.today)?;

        if self.history.is_some() {
            let deck_name = &self.deck_name;
            self.pending_history.extend(
                summary
                    .reviewed
                    .iter()
                    .map(|r| HistoryEntry::reviewed(deck_name, &r.question, &r.outcome)),
            );
        }

        Ok(summary)
    }

    /// Review due cards with answers typed by the learner
    pub fn review_with_input<R: Rng + ?Sized>(
        &mut self,
        input: &mut dyn InputProvider,
        rng: &mut R,
    ) -> LeitnerResult<ReviewSummary> {
        let mut answers = PromptedAnswers::new(input);
        self.review(&mut answers, rng)
    }

    /// Write the deck back to its file, then the history of what changed
    ///
    /// History is only written for changes that reached the deck file.
    pub fn save(&mut self, storage: &dyn DeckStorage) -> LeitnerResult<()> {
        storage.save(&self.deck_path, &self.scheduler)?;

        if let Some(history) = &self.history {
            history.log_batch(&self.pending_history)?;
        }
        self.pending_history.clear();
        Ok(())
    }
}

/// Random source for review shuffles; seeded when settings fix a seed
pub fn review_rng(settings: &Settings) -> StdRng {
    match settings.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
