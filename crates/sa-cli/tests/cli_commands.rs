//! Integration tests for the sa-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STORY: &str = r#"{
  "meta": { "title": "The Cave" },
  "sections": {
    "1": {
      "text_lines": ["You stand before a cave.", "What is your name?"],
      "script": [{ "action": "INPUT", "parameters": ["name", "Name:"] }],
      "next": [
        { "text": "Enter, ${name}", "next": 2 },
        { "text": "Walk away", "next": 4 }
      ]
    },
    "2": {
      "text": "It is dark, ${name}.",
      "media": { "type": "image", "src": "cave.png" },
      "script": [{ "action": "SET", "parameters": ["torch", "lit"] }],
      "next": [{ "text": "", "next": 3 }]
    },
    "3": { "text": "You find treasure." },
    "4": { "text": "You go home." }
  }
}
"#;

/// Create a temp directory holding the test story.
fn test_story() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cave.json");
    fs::write(&path, STORY).unwrap();
    (dir, path)
}

fn sa() -> Command {
    Command::cargo_bin("sa").unwrap()
}

fn read(path: &PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_story() {
    let (_dir, path) = test_story();
    sa().arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed for 'The Cave'")
                .and(predicate::str::contains("4 sections, 3 choices")),
        );
}

#[test]
fn check_reports_bad_scripts_and_dangling_choices() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"sections": {"1": {"text": "x",
            "script": [{"action": "ADD_CHOISE", "parameters": [2, "go"]}],
            "next": [{"text": "on", "next": 7}]}}}"#,
    )
    .unwrap();

    sa().arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("did you mean ADD_CHOICE?")
                .and(predicate::str::contains("missing section 7"))
                .and(predicate::str::contains("2 problems found")),
        );
}

#[test]
fn check_fails_on_unreadable_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    sa().arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

#[test]
fn info_lists_sections() {
    let (_dir, path) = test_story();
    sa().arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Cave")
                .and(predicate::str::contains("1 roots, 2 endings"))
                .and(predicate::str::contains("You find treasure.")),
        );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_walks_the_story() {
    let (_dir, path) = test_story();
    sa().arg("play")
        .arg(&path)
        .write_stdin("Ada\n1\n\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Enter, Ada")
                .and(predicate::str::contains("It is dark, Ada."))
                .and(predicate::str::contains("You find treasure."))
                .and(predicate::str::contains("The End")),
        );
}

#[test]
fn play_reports_bad_input_and_goes_back() {
    let (_dir, path) = test_story();
    sa().arg("play")
        .arg(&path)
        .write_stdin("Ada\n9\nb\n2\nb\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("there is no choice")
                .and(predicate::str::contains("nothing to go back to"))
                .and(predicate::str::contains("You go home.")),
        );
}

#[test]
fn play_saves_and_loads() {
    let (dir, path) = test_story();
    let save = dir.path().join("progress.json");

    sa().arg("play")
        .arg(&path)
        .arg("--save")
        .arg(&save)
        .write_stdin("Ada\n1\ns\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let saved = read(&save);
    assert_eq!(saved["meta"]["title"], "The Cave");
    assert_eq!(saved["state"]["current_section"], 2);
    assert_eq!(saved["state"]["variables"]["torch"], "lit");

    sa().arg("play")
        .arg(&path)
        .arg("--save")
        .arg(&save)
        .write_stdin("Bob\nl\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("It is dark, Ada."));
}

// ---------------------------------------------------------------------------
// linearize
// ---------------------------------------------------------------------------

#[test]
fn linearize_prints_route() {
    let (_dir, path) = test_story();
    sa().arg("linearize")
        .arg(&path)
        .args(["--from", "1", "--to", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You stand before a cave.\nWhat is your name?\n\n")
                .and(predicate::str::contains("![](cave.png)"))
                .and(predicate::str::contains("You find treasure.")),
        );
}

#[test]
fn linearize_writes_file_without_media() {
    let (dir, path) = test_story();
    let out = dir.path().join("cave.md");
    sa().arg("linearize")
        .arg(&path)
        .args(["--from", "1", "--to", "3", "--through", "2", "--no-media", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 sections"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("It is dark, ${name}."));
    assert!(!text.contains("cave.png"));
}

#[test]
fn linearize_fails_without_route() {
    let (_dir, path) = test_story();
    sa().arg("linearize")
        .arg(&path)
        .args(["--from", "1", "--to", "4", "--through", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no linear story"));
}

// ---------------------------------------------------------------------------
// section / choice
// ---------------------------------------------------------------------------

#[test]
fn section_add_and_text() {
    let (_dir, path) = test_story();
    sa().args(["section", "add"])
        .arg(&path)
        .args(["--text", "A side room."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added section 5"));

    sa().args(["section", "text"])
        .arg(&path)
        .args(["3", "Gold!\\nSo much gold."])
        .assert()
        .success();

    let doc = read(&path);
    assert_eq!(doc["sections"]["5"]["text_lines"][0], "A side room.");
    assert_eq!(doc["sections"]["3"]["text_lines"][1], "So much gold.");
    assert!(doc["sections"]["3"].get("text").is_none());
}

#[test]
fn section_remove_drops_incoming_choices() {
    let (_dir, path) = test_story();
    sa().args(["section", "remove"])
        .arg(&path)
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 choice(s)"));

    let doc = read(&path);
    assert!(doc["sections"].get("4").is_none());
    assert_eq!(doc["sections"]["1"]["next"].as_array().unwrap().len(), 1);
}

#[test]
fn section_remove_unknown_fails() {
    let (_dir, path) = test_story();
    sa().args(["section", "remove"])
        .arg(&path)
        .arg("99")
        .assert()
        .failure()
        .stderr(predicate::str::contains("section 99 is missing"));
}

#[test]
fn choice_add_and_remove() {
    let (_dir, path) = test_story();
    sa().args(["choice", "add"])
        .arg(&path)
        .args(["4", "1", "--text", "Try again"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added choice 0 on section 4"));

    let doc = read(&path);
    assert_eq!(doc["sections"]["4"]["next"][0]["next"], 1);
    assert_eq!(doc["sections"]["4"]["next"][0]["text"], "Try again");

    sa().args(["choice", "remove"])
        .arg(&path)
        .args(["1", "0"])
        .assert()
        .success();
    let doc = read(&path);
    assert_eq!(doc["sections"]["1"]["next"][0]["next"], 4);

    sa().args(["choice", "remove"])
        .arg(&path)
        .args(["3", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no choice at position 0"));
}

#[test]
fn check_shows_expected_parameters() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.json");
    fs::write(
        &path,
        r#"{"sections": {"1": {"text": "x",
            "script": [{"action": "IF_SET_ADD_CHOICE", "parameters": ["key", 2]}]}}}"#,
    )
    .unwrap();

    sa().arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("expected 3, found 2")
                .and(predicate::str::contains("expected: IF_SET_ADD_CHOICE VARIABLE SECTION STRING")),
        );
}

#[test]
fn section_media_set_and_clear() {
    let (_dir, path) = test_story();
    sa().args(["section", "media"])
        .arg(&path)
        .args(["3", "gold.png"])
        .assert()
        .success();
    assert_eq!(read(&path)["sections"]["3"]["media"]["src"], "gold.png");

    sa().args(["section", "media"])
        .arg(&path)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed gold.png"));
    assert!(read(&path)["sections"]["3"].get("media").is_none());
}
