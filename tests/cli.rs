use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn leitner(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("leitner").unwrap();
    cmd.env_remove("LEITNER_DATA_DIR")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

/// Deck with one box-1 card answered long ago, so it is due today
fn write_due_deck(data_dir: &Path, name: &str) {
    let decks = data_dir.join("decks");
    fs::create_dir_all(&decks).unwrap();
    fs::write(
        decks.join(format!("{}.json", name)),
        r#"{"boxes": {"1": [{"question": "gato", "answer": "cat", "box": 1,
                             "created_date": "2020-01-01",
                             "last_failed_date": "2020-01-01",
                             "last_answered_date": "2020-01-01"}],
                      "2": [], "3": [], "4": [], "5": [], "6": [], "7": []}}"#,
    )
    .unwrap();
}

#[test]
fn init_creates_directories_and_settings() {
    let temp = TempDir::new().unwrap();

    leitner(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(temp.path().join("decks").is_dir());
    assert!(temp.path().join("backups").is_dir());
    assert!(temp.path().join("config.json").is_file());

    leitner(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn deck_create_and_list() {
    let temp = TempDir::new().unwrap();

    leitner(temp.path())
        .args(["deck", "create", "spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created deck 'spanish'"));

    leitner(temp.path())
        .args(["deck", "create", "spanish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deck already exists: spanish"));

    leitner(temp.path())
        .args(["deck", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spanish"));
}

#[test]
fn card_add_then_show_and_status() {
    let temp = TempDir::new().unwrap();
    leitner(temp.path()).args(["deck", "create", "spanish"]).assert().success();

    leitner(temp.path())
        .args(["card", "add", "spanish", "perro", "dog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added card to 'spanish': perro"))
        .stdout(predicate::str::contains("New cards left today: 9"));

    leitner(temp.path())
        .args(["deck", "show", "spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Box 1:\n\tperro"));

    leitner(temp.path())
        .args(["status", "spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards:        1"))
        .stdout(predicate::str::contains("Due today:    0"));
}

#[test]
fn card_add_respects_daily_limit() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{"daily_new_card_limit": 1}"#,
    )
    .unwrap();
    leitner(temp.path()).args(["deck", "create", "spanish"]).assert().success();

    leitner(temp.path())
        .args(["card", "add", "spanish", "uno", "one"])
        .assert()
        .success();

    leitner(temp.path())
        .args(["card", "add", "spanish", "dos", "two"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily limit of 1 new cards reached"));
}

#[test]
fn card_add_to_missing_deck_fails() {
    let temp = TempDir::new().unwrap();

    leitner(temp.path())
        .args(["card", "add", "nowhere", "q", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deck not found: nowhere"));
}

#[test]
fn due_lists_cards_for_a_date() {
    let temp = TempDir::new().unwrap();
    write_due_deck(temp.path(), "spanish");

    leitner(temp.path())
        .args(["due", "spanish", "--date", "2020-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due on 2020-01-01."));

    leitner(temp.path())
        .args(["due", "spanish", "--date", "2020-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gato"))
        .stdout(predicate::str::contains("1 card(s) due on 2020-01-02"));

    leitner(temp.path())
        .args(["due", "spanish", "--date", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn review_reads_answers_from_stdin() {
    let temp = TempDir::new().unwrap();
    write_due_deck(temp.path(), "spanish");

    leitner(temp.path())
        .args(["review", "spanish"])
        .write_stdin("Cat\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("gato"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Reviewed 1 card(s): 1 correct, 0 incorrect"));

    let saved = fs::read_to_string(temp.path().join("decks").join("spanish.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value["boxes"]["2"][0]["question"], "gato");
    assert!(value["boxes"]["1"].as_array().unwrap().is_empty());

    leitner(temp.path())
        .args(["backup", "list", "spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));

    leitner(temp.path())
        .args(["history", "--deck", "spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REVIEWED spanish: gato (correct, box 1 -> 2)"));
}

#[test]
fn review_wrong_answer_shows_correct_one() {
    let temp = TempDir::new().unwrap();
    write_due_deck(temp.path(), "spanish");

    leitner(temp.path())
        .args(["review", "spanish"])
        .write_stdin("dog\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect. The correct answer is cat"));
}

#[test]
fn study_adds_cards_interactively() {
    let temp = TempDir::new().unwrap();

    leitner(temp.path())
        .args(["study", "french"])
        .write_stdin("y\nchat\ncat\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Box 7:"))
        .stdout(predicate::str::contains("Added 1 card(s)."))
        .stdout(predicate::str::contains("No cards to review today."));

    assert!(temp.path().join("decks").join("french.json").is_file());

    leitner(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("ADDED french: chat (box 1)"));
}

#[test]
fn backup_restore_requires_force() {
    let temp = TempDir::new().unwrap();
    write_due_deck(temp.path(), "spanish");
    leitner(temp.path())
        .args(["review", "spanish"])
        .write_stdin("cat\n")
        .assert()
        .success();

    let backup = fs::read_dir(temp.path().join("backups"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .file_name()
        .to_string_lossy()
        .to_string();

    leitner(temp.path())
        .args(["backup", "restore", &backup])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    leitner(temp.path())
        .args(["backup", "restore", &backup, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete"));

    let restored = fs::read_to_string(temp.path().join("decks").join("spanish.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&restored).unwrap();
    assert_eq!(value["boxes"]["1"][0]["question"], "gato");
}
