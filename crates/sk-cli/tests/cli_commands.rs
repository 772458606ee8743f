//! Integration tests for the CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DUEL: &str = r#"{
    "name": "Crossroads",
    "regions": [
        { "name": "Road", "yards": 0 },
        { "name": "Ditch", "yards": 8, "cover": "medium" }
    ],
    "player": {
        "name": "Wendel",
        "attributes": { "strength": 8, "vigor": 8 },
        "skills": { "fighting": 10 },
        "melee": "Longsword"
    },
    "enemies": [
        { "name": "Bandit", "count": 2, "skills": { "fighting": 4 }, "melee": "Club" }
    ],
    "weapons": [
        { "name": "Longsword", "damage": "d8" },
        { "name": "Club", "damage": "d4" }
    ]
}"#;

/// Create a temp directory holding a scenario file.
fn scenario(json: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

fn sk() -> Command {
    Command::cargo_bin("sk").unwrap()
}

// ---------------------------------------------------------------------------
// odds
// ---------------------------------------------------------------------------

#[test]
fn odds_prints_table() {
    sk().args(["odds", "d4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Odds for"))
        .stdout(predicate::str::contains("25.0%"))
        .stdout(predicate::str::contains("With wild die").not());
}

#[test]
fn odds_with_wild_die() {
    sk().args(["odds", "d8", "--wild"])
        .assert()
        .success()
        .stdout(predicate::str::contains("With wild die"));
}

#[test]
fn odds_rejects_bad_die() {
    sk().args(["odds", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid die expression"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_is_deterministic_for_a_seed() {
    let first = sk().args(["roll", "2d6+1", "--seed", "9"]).output().unwrap();
    let second = sk().args(["roll", "2d6+1", "--seed", "9"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("Rolled"));
}

#[test]
fn roll_with_wild_die_shows_both() {
    sk().args(["roll", "d8", "--wild"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wild"));
}

#[test]
fn roll_rejects_no_die() {
    sk().args(["roll", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no die to roll"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_shows_status_and_quits() {
    let (_dir, path) = scenario(DUEL);
    sk().arg("play")
        .arg(&path)
        .arg("--no-shuffle")
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crossroads"))
        .stdout(predicate::str::contains("Bandit 1"))
        .stdout(predicate::str::contains("Bandit 2"))
        .stdout(predicate::str::contains("undecided"));
}

#[test]
fn play_logs_commands_at_debug_level() {
    let (_dir, path) = scenario(DUEL);
    sk().arg("play")
        .arg(&path)
        .arg("--no-shuffle")
        .env("RUST_LOG", "sk=debug")
        .write_stdin("status\ndance\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("battle set up"))
        .stderr(predicate::str::contains("player command"))
        .stderr(predicate::str::contains("Status"))
        .stderr(predicate::str::contains("rejected player input"));
}

#[test]
fn play_is_quiet_on_stderr_by_default() {
    let (_dir, path) = scenario(DUEL);
    sk().arg("play")
        .arg(&path)
        .arg("--no-shuffle")
        .env_remove("RUST_LOG")
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("player command").not());
}

#[test]
fn play_reports_rejected_commands() {
    let (_dir, path) = scenario(DUEL);
    sk().arg("play")
        .arg(&path)
        .arg("--no-shuffle")
        .write_stdin("move -\nattack 0\ndance\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot do that: out of range"))
        .stdout(predicate::str::contains("cannot do that: invalid"))
        .stdout(predicate::str::contains("unknown command"));
}

#[test]
fn play_attack_is_narrated() {
    let (_dir, path) = scenario(DUEL);
    sk().arg("play")
        .arg(&path)
        .args(["--no-shuffle", "--seed", "3"])
        .write_stdin("attack 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("attacks"))
        .stdout(predicate::str::contains("with Longsword"));
}

#[test]
fn play_runs_to_the_end() {
    let (_dir, path) = scenario(DUEL);
    let commands = "attack 1\nend\nattack 2\nend\n".repeat(40);
    sk().arg("play")
        .arg(&path)
        .args(["--seed", "5"])
        .write_stdin(commands)
        .assert()
        .success();
}

#[test]
fn play_sample_scenario() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/chapel.json");
    sk().args(["play", path])
        .write_stdin("status\nend\nend\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sister Agathe"));
}

#[test]
fn play_missing_file_fails() {
    sk().args(["play", "/nonexistent/scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn play_unknown_weapon_fails() {
    let (_dir, path) = scenario(&DUEL.replace("\"melee\": \"Club\"", "\"melee\": \"Halberd\""));
    sk().arg("play")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weapon: Halberd"));
}
