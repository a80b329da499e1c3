//! Integration tests for `slotbook book` and `slotbook cancel`.

mod common;

use common::{parse_receipt, TestEnv, SLOT};
use predicates::prelude::*;

#[test]
fn test_book_individual_prints_id_and_label() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\tP1\n$").unwrap())
        .stderr(predicate::str::contains("Booked P1 for alice"));
}

#[test]
fn test_book_auto_initializes_inventory() {
    let env = TestEnv::new();
    assert!(!env.data_dir.exists());

    let (_, label) = env.book_person("private", SLOT, "alice", 30);
    assert_eq!(label, "P1");
    assert!(env.data_dir.join("slotbook.db").exists());
}

#[test]
fn test_book_allocates_first_free_instance() {
    let env = TestEnv::new();

    let (_, first) = env.book_person("PRIVATE", SLOT, "alice", 30);
    let (_, second) = env.book_person("PRIVATE", SLOT, "bob", 30);
    let (_, next_hour) = env.book_person("PRIVATE", "2030-01-07T11:00", "carol", 30);

    assert_eq!(first, "P1");
    assert_eq!(second, "P2");
    assert_eq!(next_hour, "P1");
}

#[test]
fn test_book_team_with_members() {
    let env = TestEnv::new();

    let output = env
        .manager()
        .args(["book", "--room-type", "CONFERENCE", "--slot", SLOT, "--team", "core"])
        .args(["--member", "ana:34:F", "--member", "bo:10", "--member", "cy:41:M"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let (_, label) = parse_receipt(&String::from_utf8(output.stdout).unwrap());
    assert_eq!(label, "C1");

    let bookings = env.bookings_json();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["kind"], "TEAM");
    assert_eq!(bookings[0]["requester"], "core");
}

#[test]
fn test_team_with_too_few_eligible_members_is_rejected() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "CONFERENCE", "--slot", SLOT, "--team", "kids"])
        .args(["--member", "ana:34", "--member", "bo:9", "--member", "cy:41"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("aged 10 or older"));
}

#[test]
fn test_category_mismatch_exits_with_rejection_code() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "CONFERENCE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .code(1);

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT, "--team", "core"])
        .args(["--member", "ana:34", "--member", "bo:30", "--member", "cy:41"])
        .assert()
        .code(1);
}

#[test]
fn test_same_person_twice_in_one_slot_is_rejected() {
    let env = TestEnv::new();
    env.book_person("SHARED", SLOT, "alice", 30);

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already has a booking"));
}

#[test]
fn test_book_from_request_file() {
    let env = TestEnv::new();
    let request = env.write_file(
        "request.json",
        r#"{"room_type": "shared", "slot": "2030-01-07T10:00", "user": {"name": "dana", "age": 28, "gender": "F"}}"#,
    );

    env.manager()
        .arg("book")
        .arg("--request")
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains("\tS1"));
}

#[test]
fn test_book_from_stdin() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--request", "-"])
        .write_stdin(r#"{"room_type": "PRIVATE", "slot": "2030-01-07T10:00", "user": {"name": "eve", "age": 40}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\tP1"));
}

#[test]
fn test_malformed_request_document_is_invalid_input() {
    let env = TestEnv::new();
    let request = env.write_file("bad.json", "{ not json");

    env.manager()
        .arg("book")
        .arg("--request")
        .arg(&request)
        .assert()
        .code(4);
}

#[test]
fn test_book_json_receipt() {
    let env = TestEnv::new();

    let output = env
        .manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let receipt: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(receipt["resource_label"], "P1");
    assert!(receipt["reservation_id"].is_i64());
}

#[test]
fn test_dry_run_saves_nothing() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30", "--dry-run"])
        .assert()
        .success()
        .stdout("P1\n")
        .stderr(predicate::str::contains("Dry run"));

    assert!(env.bookings_json().is_empty());
    env.manager()
        .args(["people", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice").not());
}

#[test]
fn test_negative_age_is_invalid_input() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "-3"])
        .assert()
        .code(4);
}

#[test]
fn test_unparsable_slot_is_invalid_input() {
    let env = TestEnv::new();

    env.manager()
        .args(["book", "--room-type", "PRIVATE", "--slot", "next tuesday"])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .code(4);
}

#[test]
fn test_standard_role_cannot_book() {
    let env = TestEnv::new();

    env.command()
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("manager or admin"));
}

#[test]
fn test_role_from_environment() {
    let env = TestEnv::new();

    env.command()
        .env("SLOTBOOK_ROLE", "admin")
        .args(["book", "--room-type", "PRIVATE", "--slot", SLOT])
        .args(["--name", "alice", "--age", "30"])
        .assert()
        .success();
}

#[test]
fn test_cancel_frees_the_resource() {
    let env = TestEnv::new();
    let (id, _) = env.book_person("PRIVATE", SLOT, "alice", 30);

    env.manager()
        .args(["cancel", &id.to_string()])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("Cancelled booking {id}")));

    let bookings = env.bookings_json();
    assert_eq!(bookings[0]["status"], "CANCELLED");

    let (_, label) = env.book_person("PRIVATE", SLOT, "alice", 30);
    assert_eq!(label, "P1");
}

#[test]
fn test_cancel_twice_is_not_found() {
    let env = TestEnv::new();
    let (id, _) = env.book_person("PRIVATE", SLOT, "alice", 30);

    env.manager().args(["cancel", &id.to_string()]).assert().success();
    env.manager()
        .args(["cancel", &id.to_string()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cancel_requires_privilege() {
    let env = TestEnv::new();
    let (id, _) = env.book_person("PRIVATE", SLOT, "alice", 30);

    env.command().args(["cancel", &id.to_string()]).assert().code(8);
    assert_eq!(env.bookings_json()[0]["status"], "ACTIVE");
}
