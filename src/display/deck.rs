//! Deck display formatting
//!
//! Formats boxes, due cards and review results for terminal output.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{BoxNumber, Card};
use crate::scheduler::{NewCardQuota, ReviewSummary, Scheduler};

/// Render a date with the configured format, falling back to ISO dates
/// when the format cannot render a calendar date
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(date_format)) {
        Ok(()) => rendered,
        Err(_) => date.to_string(),
    }
}

/// Format every box with its questions and their next review date
pub fn format_boxes(scheduler: &Scheduler, date_format: &str) -> String {
    let mut output = String::new();

    for box_number in BoxNumber::all() {
        output.push_str(&format!("Box {}:\n", box_number));
        for card in scheduler.box_cards(box_number) {
            output.push_str(&format!(
                "\t{}  (next review {})\n",
                card.question(),
                format_date(card.next_review_date(), date_format)
            ));
        }
    }

    output
}

/// Format the cards due on a date as a table
pub fn format_due_list(cards: &[&Card], date: NaiveDate, date_format: &str) -> String {
    if cards.is_empty() {
        return format!("No cards due on {}.", format_date(date, date_format));
    }

    let question_width = cards
        .iter()
        .map(|c| c.question().chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<question_width$}  {}\n",
        "Box",
        "Question",
        "Last answered",
        question_width = question_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<question_width$}  {:-<13}\n",
        "",
        "",
        "",
        question_width = question_width,
    ));

    for card in cards {
        output.push_str(&format!(
            "{:>3}  {:<question_width$}  {}\n",
            card.box_number(),
            card.question(),
            format_date(card.last_answered_date(), date_format),
            question_width = question_width,
        ));
    }

    output.push_str(&format!(
        "\n{} card(s) due on {}\n",
        cards.len(),
        format_date(date, date_format)
    ));
    output
}

/// Format per-box counts, today's due count and the new-card quota
pub fn format_status(
    deck_name: &str,
    scheduler: &Scheduler,
    today: NaiveDate,
    quota: NewCardQuota,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Deck: {}\n", deck_name));
    output.push_str(&format!("  Cards:        {}\n", scheduler.len()));
    output.push_str(&format!(
        "  Due today:    {}\n",
        scheduler.due_today(today).len()
    ));
    output.push_str(&format!(
        "  New today:    {} of {}\n",
        quota.used(),
        quota.limit()
    ));
    output.push('\n');

    output.push_str(&format!("{:>3}  {:>5}  {:>6}\n", "Box", "Delay", "Cards"));
    for (box_number, count) in scheduler.box_counts() {
        output.push_str(&format!(
            "{:>3}  {:>4}d  {:>6}\n",
            box_number,
            box_number.delay_days(),
            count
        ));
    }

    output
}

/// Format the outcome of a review session
pub fn format_review_summary(summary: &ReviewSummary) -> String {
    if summary.total() == 0 {
        return "No cards to review today.".to_string();
    }

    let promoted = summary
        .reviewed
        .iter()
        .filter(|r| r.outcome.was_promoted())
        .count();

    format!(
        "Reviewed {} card(s): {} correct, {} incorrect ({} moved up)",
        summary.total(),
        summary.correct_count(),
        summary.incorrect_count(),
        promoted
    )
}

/// Format the list of deck names
pub fn format_deck_list(names: &[String]) -> String {
    if names.is_empty() {
        return "No decks found.".to_string();
    }

    names.iter().map(|n| format!("  {}\n", n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Scheduler {
        let mut scheduler = Scheduler::new();
        scheduler
            .add_card(Card::new("hola", "hello", date("2024-01-01")), 1)
            .unwrap();
        scheduler
            .add_card(Card::new("adios", "goodbye", date("2024-01-01")), 3)
            .unwrap();
        scheduler
    }

    #[test]
    fn test_format_boxes() {
        let output = format_boxes(&sample(), "%Y-%m-%d");

        assert!(output.starts_with("Box 1:\n\thola  (next review 2024-01-02)\n"));
        assert!(output.contains("Box 3:\n\tadios  (next review 2024-01-05)\n"));
        assert!(output.ends_with("Box 7:\n"));
    }

    #[test]
    fn test_format_due_list() {
        let scheduler = sample();
        let due = scheduler.due_cards(date("2024-01-02"));
        let output = format_due_list(&due, date("2024-01-02"), "%Y-%m-%d");

        assert!(output.contains("hola"));
        assert!(!output.contains("adios"));
        assert!(output.contains("1 card(s) due on 2024-01-02"));

        let none = format_due_list(&[], date("2024-01-01"), "%Y-%m-%d");
        assert_eq!(none, "No cards due on 2024-01-01.");
    }

    #[test]
    fn test_format_date_falls_back_to_iso() {
        assert_eq!(format_date(date("2024-03-09"), "%d/%m/%Y"), "09/03/2024");
        assert_eq!(format_date(date("2024-03-09"), "%H:%M"), "2024-03-09");
        assert_eq!(format_date(date("2024-03-09"), "%Q"), "2024-03-09");

        let output = format_boxes(&sample(), "%H:%M");
        assert!(output.contains("hola  (next review 2024-01-02)"));
        let none = format_due_list(&[], date("2024-01-01"), "%H:%M");
        assert_eq!(none, "No cards due on 2024-01-01.");
    }

    #[test]
    fn test_format_status() {
        let scheduler = sample();
        let quota = NewCardQuota::for_day(&scheduler, date("2024-01-01"), 10);
        let output = format_status("spanish", &scheduler, date("2024-01-05"), quota);

        assert!(output.contains("Deck: spanish"));
        assert!(output.contains("Cards:        2"));
        assert!(output.contains("Due today:    2"));
        assert!(output.contains("New today:    2 of 10"));
        assert!(output.contains("  7    60d"));
    }

    #[test]
    fn test_format_empty_summary() {
        assert_eq!(
            format_review_summary(&ReviewSummary::default()),
            "No cards to review today."
        );
    }
}
