//! Leitner box scheduler
//!
//! The scheduler owns every card of a deck and keeps them partitioned into the
//! seven boxes. Cards change box only through [`Card::apply_review`]; after a
//! batch of reviews the partition is rebuilt from each card's own box.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut scheduler = Scheduler::new();
//! scheduler.add_card(Card::new("hola", "hello", today), 1)?;
//!
//! for key in scheduler.due_today(today) {
//!     scheduler.apply_review(key, true, today)?;
//! }
//! scheduler.rebuild_box_partitioning();
//! ```

pub mod quota;
pub mod review;

pub use quota::NewCardQuota;
pub use review::{presentation_order, AnswerProvider, ReviewSummary, ReviewedCard};

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxNumber, Card, ReviewOutcome};

/// Handle to a card owned by a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardKey(usize);

/// Owns a deck's cards and their box partition
#[derive(Debug, Clone)]
pub struct Scheduler {
    cards: Vec<Card>,
    boxes: BTreeMap<BoxNumber, Vec<CardKey>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler with all seven boxes present
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            boxes: BoxNumber::all().map(|b| (b, Vec::new())).collect(),
        }
    }

    /// Add a card to the given box
    ///
    /// Fails with [`LeitnerError::InvalidBox`] when `box_number` is outside
    /// 1..=7.
    pub fn add_card(&mut self, card: Card, box_number: i64) -> LeitnerResult<CardKey> {
        let box_number = BoxNumber::new(box_number)?;
        let card = card.placed_in(box_number);

        let key = CardKey(self.cards.len());
        self.cards.push(card);
        self.boxes.entry(box_number).or_default().push(key);
        Ok(key)
    }

    pub fn card(&self, key: CardKey) -> Option<&Card> {
        self.cards.get(key.0)
    }

    /// All cards in insertion order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards currently filed under a box, in partition order
    pub fn box_cards(&self, box_number: BoxNumber) -> impl Iterator<Item = &Card> + '_ {
        self.boxes
            .get(&box_number)
            .into_iter()
            .flatten()
            .filter_map(move |key| self.cards.get(key.0))
    }

    /// Number of cards in each box, ascending
    pub fn box_counts(&self) -> Vec<(BoxNumber, usize)> {
        BoxNumber::all()
            .map(|b| (b, self.boxes.get(&b).map_or(0, Vec::len)))
            .collect()
    }

    /// Find a card by its question (case-insensitive)
    pub fn find_by_question(&self, question: &str) -> Option<CardKey> {
        let needle = question.trim().to_lowercase();
        self.cards
            .iter()
            .position(|c| c.question().trim().to_lowercase() == needle)
            .map(CardKey)
    }

    /// Number of cards created on a given date
    pub fn count_created_on(&self, date: NaiveDate) -> usize {
        self.cards.iter().filter(|c| c.created_date() == date).count()
    }

    /// Cards due on or before `reference_date`
    ///
    /// A card is due when its last answer date plus its box delay is not after
    /// the reference date. Results come in ascending box order, then partition
    /// order. Does not modify the scheduler.
    pub fn due_today(&self, reference_date: NaiveDate) -> Vec<CardKey> {
        self.boxes
            .values()
            .flatten()
            .copied()
            .filter(|key| {
                self.cards
                    .get(key.0)
                    .is_some_and(|card| card.is_due(reference_date))
            })
            .collect()
    }

    /// Due cards resolved to references, same order as [`Scheduler::due_today`]
    pub fn due_cards(&self, reference_date: NaiveDate) -> Vec<&Card> {
        self.due_today(reference_date)
            .into_iter()
            .filter_map(|key| self.card(key))
            .collect()
    }

    /// Apply a review result to one card
    ///
    /// The box partition is stale until [`Scheduler::rebuild_box_partitioning`]
    /// runs.
    pub fn apply_review(
        &mut self,
        key: CardKey,
        correct: bool,
        review_date: NaiveDate,
    ) -> LeitnerResult<ReviewOutcome> {
        let card = self
            .cards
            .get_mut(key.0)
            .ok_or_else(|| LeitnerError::card_not_found(key.0.to_string()))?;
        Ok(card.apply_review(correct, review_date))
    }

    /// Re-derive the box partition from each card's current box
    pub fn rebuild_box_partitioning(&mut self) {
        for keys in self.boxes.values_mut() {
            keys.clear();
        }
        for (index, card) in self.cards.iter().enumerate() {
            self.boxes
                .entry(card.box_number())
                .or_default()
                .push(CardKey(index));
        }
    }

    /// Check that every card sits in exactly the box it names
    pub fn is_partition_consistent(&self) -> bool {
        let filed: usize = self.boxes.values().map(Vec::len).sum();
        filed == self.cards.len()
            && self.boxes.iter().all(|(box_number, keys)| {
                keys.iter().all(|key| {
                    self.cards
                        .get(key.0)
                        .is_some_and(|card| card.box_number() == *box_number)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_scheduler() -> Scheduler {
        let mut scheduler = Scheduler::new();
        scheduler.add_card(Card::new("one", "1", date("2024-01-01")), 1).unwrap();
        scheduler.add_card(Card::new("two", "2", date("2024-01-01")), 2).unwrap();
        scheduler.add_card(Card::new("three", "3", date("2024-01-01")), 3).unwrap();
        scheduler.add_card(Card::new("four", "4", date("2024-01-03")), 1).unwrap();
        scheduler
    }

    fn questions(scheduler: &Scheduler, keys: &[CardKey]) -> Vec<String> {
        keys.iter()
            .map(|k| scheduler.card(*k).unwrap().question().to_string())
            .collect()
    }

    #[test]
    fn test_new_scheduler_has_seven_empty_boxes() {
        let scheduler = Scheduler::new();
        let counts = scheduler.box_counts();
        assert_eq!(counts.len(), 7);
        assert!(counts.iter().all(|(_, n)| *n == 0));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_add_card_files_under_target_box() {
        let scheduler = sample_scheduler();
        assert_eq!(scheduler.len(), 4);
        assert_eq!(scheduler.box_cards(BoxNumber::FIRST).count(), 2);
        assert_eq!(
            scheduler.box_cards(BoxNumber::new(3).unwrap()).next().unwrap().box_number().get(),
            3
        );
        assert!(scheduler.is_partition_consistent());
    }

    #[test]
    fn test_add_card_rejects_invalid_box() {
        let mut scheduler = Scheduler::new();
        let result = scheduler.add_card(Card::new("q", "a", date("2024-01-01")), 8);
        assert!(matches!(result, Err(LeitnerError::InvalidBox(8))));
        let result = scheduler.add_card(Card::new("q", "a", date("2024-01-01")), 0);
        assert!(matches!(result, Err(LeitnerError::InvalidBox(0))));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_due_today_boundary() {
        let mut scheduler = Scheduler::new();
        scheduler.add_card(Card::new("q", "a", date("2024-01-01")), 1).unwrap();

        assert!(scheduler.due_today(date("2024-01-01")).is_empty());
        assert_eq!(scheduler.due_today(date("2024-01-02")).len(), 1);
    }

    #[test]
    fn test_due_today_orders_by_box() {
        let scheduler = sample_scheduler();
        let due = scheduler.due_today(date("2024-01-10"));
        assert_eq!(questions(&scheduler, &due), vec!["one", "four", "two", "three"]);

        // box 2 due 2024-01-03, box 3 due 2024-01-05, "four" due 2024-01-04
        let due = scheduler.due_today(date("2024-01-03"));
        assert_eq!(questions(&scheduler, &due), vec!["one", "two"]);
    }

    #[test]
    fn test_due_today_is_pure() {
        let scheduler = sample_scheduler();
        let first = scheduler.due_today(date("2024-01-04"));
        let second = scheduler.due_today(date("2024-01-04"));
        assert_eq!(first, second);
        assert_eq!(scheduler.cards(), sample_scheduler().cards());
    }

    #[test]
    fn test_review_then_rebuild_moves_cards() {
        let mut scheduler = sample_scheduler();
        let review_day = date("2024-01-10");
        let due = scheduler.due_today(review_day);

        // "one" correct -> box 2, "two" wrong -> box 1
        scheduler.apply_review(due[0], true, review_day).unwrap();
        scheduler.apply_review(due[2], false, review_day).unwrap();
        assert!(!scheduler.is_partition_consistent());

        scheduler.rebuild_box_partitioning();
        assert!(scheduler.is_partition_consistent());

        let box_one: Vec<_> = scheduler.box_cards(BoxNumber::FIRST).map(|c| c.question()).collect();
        assert_eq!(box_one, vec!["two", "four"]);
        let box_two: Vec<_> = scheduler
            .box_cards(BoxNumber::new(2).unwrap())
            .map(|c| c.question())
            .collect();
        assert_eq!(box_two, vec!["one"]);
    }

    #[test]
    fn test_scenario_box_three_correct_then_due_in_seven_days() {
        let mut scheduler = Scheduler::new();
        let key = scheduler.add_card(Card::new("q", "a", date("2024-01-01")), 3).unwrap();

        let outcome = scheduler.apply_review(key, true, date("2024-01-05")).unwrap();
        scheduler.rebuild_box_partitioning();

        assert_eq!(outcome.new_box.get(), 4);
        let card = scheduler.card(key).unwrap();
        assert_eq!(card.last_answered_date(), date("2024-01-05"));
        assert_eq!(card.next_review_date(), date("2024-01-12"));
        assert!(scheduler.due_today(date("2024-01-11")).is_empty());
        assert_eq!(scheduler.due_today(date("2024-01-12")), vec![key]);
    }

    #[test]
    fn test_apply_review_unknown_key() {
        let mut scheduler = Scheduler::new();
        let err = scheduler.apply_review(CardKey(3), true, date("2024-01-01")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_and_count_created() {
        let scheduler = sample_scheduler();
        assert!(scheduler.find_by_question("TWO").is_some());
        assert!(scheduler.find_by_question("five").is_none());
        assert_eq!(scheduler.count_created_on(date("2024-01-01")), 3);
        assert_eq!(scheduler.count_created_on(date("2024-01-03")), 1);
    }
}
