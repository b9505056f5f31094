//! Daily new-card quota
//!
//! Limits how many cards a learner creates per calendar day. The count is
//! recomputed from the deck at session start, so it survives restarts.

use chrono::NaiveDate;

use super::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCardQuota {
    limit: u32,
    used: u32,
}

impl NewCardQuota {
    pub fn new(limit: u32, used: u32) -> Self {
        Self { limit, used }
    }

    /// Quota for `today`, counting cards already created that day
    pub fn for_day(scheduler: &Scheduler, today: NaiveDate, limit: u32) -> Self {
        let used = u32::try_from(scheduler.count_created_on(today)).unwrap_or(u32::MAX);
        Self::new(limit, used)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Count one more card against the quota
    pub fn record_addition(&mut self) {
        self.used = self.used.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Card;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_counts_only_cards_created_today() {
        let mut scheduler = Scheduler::new();
        for i in 0..3 {
            let card = Card::new(format!("old {}", i), "a", date("2024-01-01"));
            scheduler.add_card(card, 1).unwrap();
        }
        for i in 0..4 {
            let card = Card::new(format!("new {}", i), "a", date("2024-01-02"));
            scheduler.add_card(card, 1).unwrap();
        }

        let quota = NewCardQuota::for_day(&scheduler, date("2024-01-02"), 10);
        assert_eq!(quota.used(), 4);
        assert_eq!(quota.remaining(), 6);
        assert!(!quota.is_exhausted());
    }

    #[test]
    fn test_exhausted_at_limit() {
        let mut quota = NewCardQuota::new(10, 8);
        quota.record_addition();
        assert!(!quota.is_exhausted());
        quota.record_addition();
        assert!(quota.is_exhausted());
        assert_eq!(quota.remaining(), 0);
    }

    #[test]
    fn test_over_limit_from_edited_file() {
        let quota = NewCardQuota::new(10, 14);
        assert!(quota.is_exhausted());
        assert_eq!(quota.remaining(), 0);
    }
}
