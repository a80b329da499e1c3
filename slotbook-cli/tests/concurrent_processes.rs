//! Separate processes racing for the same resources.
//!
//! Every process opens its own connection, so these exercise the database
//! lock rather than anything in-process.

mod common;

use common::{parse_receipt, TestEnv, SLOT};
use std::collections::HashSet;
use std::process::Output;
use std::thread;

fn spawn_bookings(env: &TestEnv, room_type: &str, names: &[String]) -> Vec<Output> {
    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let mut cmd = env.manager();
            cmd.args(["--busy-timeout", "30", "book", "--room-type", room_type])
                .args(["--slot", SLOT, "--name", name, "--age", "30"]);
            thread::spawn(move || cmd.output().expect("failed to run book"))
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().expect("booking thread panicked"))
        .collect()
}

#[test]
fn test_last_private_room_goes_to_one_process() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.data_dir).unwrap();
    std::fs::write(
        env.data_dir.join("config.yaml"),
        "inventory:\n  - label: Solo\n    category: PRIVATE\n",
    )
    .unwrap();
    env.init();

    let names: Vec<String> = (0..6).map(|i| format!("racer-{i}")).collect();
    let outputs = spawn_bookings(&env, "PRIVATE", &names);

    let winners: Vec<_> = outputs.iter().filter(|o| o.status.success()).collect();
    assert_eq!(winners.len(), 1, "exactly one process should get the room");
    let (_, label) = parse_receipt(&String::from_utf8_lossy(&winners[0].stdout));
    assert_eq!(label, "Solo");

    for loser in outputs.iter().filter(|o| !o.status.success()) {
        assert_eq!(loser.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&loser.stderr).contains("no PRIVATE resource"));
    }

    assert_eq!(env.bookings_json().len(), 1);
}

#[test]
fn test_shared_desk_never_exceeds_capacity() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.data_dir).unwrap();
    std::fs::write(
        env.data_dir.join("config.yaml"),
        "inventory:\n  - label: Bench\n    category: SHARED\n    capacity: 3\n",
    )
    .unwrap();
    env.init();

    let names: Vec<String> = (0..8).map(|i| format!("desk-{i}")).collect();
    let outputs = spawn_bookings(&env, "SHARED", &names);

    let ids: HashSet<i64> = outputs
        .iter()
        .filter(|o| o.status.success())
        .map(|o| parse_receipt(&String::from_utf8_lossy(&o.stdout)).0)
        .collect();
    assert_eq!(ids.len(), 3);

    let active = env
        .bookings_json()
        .iter()
        .filter(|b| b["status"] == "ACTIVE")
        .count();
    assert_eq!(active, 3);
}
