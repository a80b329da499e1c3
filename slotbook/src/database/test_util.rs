//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::config::ResourceDefinition;
use crate::database::{Database, DatabaseConfig};
use crate::person::Person;
use crate::resource::{ResourceCategory, ResourceInstance};
use crate::slot::Slot;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the life of the test process
    std::mem::forget(dir);

    db
}

/// A slot on a fixed weekday in 2030 starting at `hour`.
///
/// # Panics
///
/// Panics if `hour` is not a valid hour.
#[must_use]
pub fn slot_at(hour: u32) -> Slot {
    Slot::new(
        NaiveDate::from_ymd_opt(2030, 1, 7)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
    )
}

/// Inserts a resource and returns it.
///
/// # Panics
///
/// Panics if the insert fails or the label already exists.
pub fn seed_resource(
    conn: &Connection,
    label: &str,
    category: ResourceCategory,
    capacity: u32,
) -> ResourceInstance {
    let def = ResourceDefinition::new(label, category, capacity);
    assert!(Database::insert_resource_if_absent(conn, &def).unwrap());
    Database::list_resources(conn, None)
        .unwrap()
        .into_iter()
        .find(|r| r.label == label)
        .unwrap()
}

/// Inserts a person and returns them.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_person(conn: &Connection, name: &str, age: u32) -> Person {
    Database::get_or_create_person(conn, name, age, None).unwrap()
}
