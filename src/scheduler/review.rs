//! Review sessions
//!
//! Due cards are grouped by box, shuffled within each box and presented lowest
//! box first. Each answer goes through [`Card::apply_review`]; the box
//! partition is rebuilt once the pass ends.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{CardKey, Scheduler};
use crate::error::LeitnerResult;
use crate::models::{BoxNumber, Card, ReviewOutcome};

/// Source of the learner's answers during a review session
pub trait AnswerProvider {
    /// Obtain the learner's answer for a card
    fn answer(&mut self, card: &Card) -> LeitnerResult<String>;

    /// Called after each card is scored
    fn on_result(&mut self, _card: &Card, _outcome: &ReviewOutcome) -> LeitnerResult<()> {
        Ok(())
    }
}

/// One card's result within a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedCard {
    pub key: CardKey,
    pub question: String,
    pub outcome: ReviewOutcome,
}

/// Results of a review session, in presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub reviewed: Vec<ReviewedCard>,
}

impl ReviewSummary {
    pub fn total(&self) -> usize {
        self.reviewed.len()
    }

    pub fn correct_count(&self) -> usize {
        self.reviewed.iter().filter(|r| r.outcome.correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.total() - self.correct_count()
    }
}

/// Order in which due cards are shown
///
/// Cards are grouped by box, shuffled inside each group with `rng`, and the
/// groups are concatenated from box 1 upward.
pub fn presentation_order<R: Rng + ?Sized>(
    scheduler: &Scheduler,
    due: &[CardKey],
    rng: &mut R,
) -> Vec<CardKey> {
    let mut groups: BTreeMap<BoxNumber, Vec<CardKey>> = BTreeMap::new();
    for key in due {
        if let Some(card) = scheduler.card(*key) {
            groups.entry(card.box_number()).or_default().push(*key);
        }
    }

    groups
        .into_values()
        .flat_map(|mut group| {
            group.shuffle(&mut *rng);
            group
        })
        .collect()
}

impl Scheduler {
    /// Run a review pass over `due`
    ///
    /// The partition is rebuilt even when the answer provider fails part way
    /// through, so cards already scored keep their new box.
    pub fn review_session<R: Rng + ?Sized>(
        &mut self,
        due: &[CardKey],
        answers: &mut dyn AnswerProvider,
        rng: &mut R,
        review_date: NaiveDate,
    ) -> LeitnerResult<ReviewSummary> {
        let order = presentation_order(self, due, rng);
        let mut summary = ReviewSummary::default();

        let result = self.review_in_order(&order, answers, review_date, &mut summary);
        self.rebuild_box_partitioning();
        result.map(|()| summary)
    }

    fn review_in_order(
        &mut self,
        order: &[CardKey],
        answers: &mut dyn AnswerProvider,
        review_date: NaiveDate,
        summary: &mut ReviewSummary,
    ) -> LeitnerResult<()> {
        for key in order {
            let Some(card) = self.card(*key) else {
                continue;
            };
            let response = answers.answer(card)?;
            let correct = card.matches_answer(&response);

            let outcome = self.apply_review(*key, correct, review_date)?;
            if let Some(card) = self.card(*key) {
                answers.on_result(card, &outcome)?;
                summary.reviewed.push(ReviewedCard {
                    key: *key,
                    question: card.question().to_string(),
                    outcome,
                });
            }
        }
        Ok(())
    }
}
