//! Availability and occupancy queries.
//!
//! Both take the current time as a parameter instead of reading a clock.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::allocation::available_resources;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::person::Capability;
use crate::resource::{ResourceCategory, ResourceInstance};
use crate::slot::{BusinessHours, Slot};

/// Parses and checks a slot for an availability query.
///
/// # Errors
///
/// Returns [`Error::InvalidSlot`] if the slot is unparsable, not on the
/// hour, starts before `now`, or starts outside business hours.
pub fn validate_query_slot(text: &str, hours: &BusinessHours, now: NaiveDateTime) -> Result<Slot> {
    let invalid = |reason: String| Error::InvalidSlot {
        slot: text.to_string(),
        reason,
    };

    let slot = Slot::parse(text).map_err(|e| invalid(e.message))?;
    if slot.start() < now {
        return Err(invalid("slot is in the past".into()));
    }
    if !hours.contains(&slot) {
        return Err(invalid(format!(
            "slot must start between {} and {}",
            hours.start.format("%H:%M"),
            hours.end.format("%H:%M")
        )));
    }
    Ok(slot)
}

/// Lists instances of a category that could take a booking at `slot`.
///
/// Needs no privilege.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an unknown category,
/// [`Error::InvalidSlot`] as described in [`validate_query_slot`], or a
/// database error.
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use slotbook::database::{Database, DatabaseConfig};
/// use slotbook::operations::check_availability;
/// use slotbook::BusinessHours;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// let now = Utc::now().naive_utc();
/// let free = check_availability(
///     db.connection(),
///     &BusinessHours::default(),
///     "SHARED",
///     "2030-01-07T10:00",
///     now,
/// )
/// .unwrap();
/// for resource in free {
///     println!("{resource}");
/// }
/// ```
pub fn check_availability(
    conn: &Connection,
    hours: &BusinessHours,
    room_type: &str,
    slot: &str,
    now: NaiveDateTime,
) -> Result<Vec<ResourceInstance>> {
    let category: ResourceCategory = room_type.parse()?;
    let slot = validate_query_slot(slot, hours, now)?;
    let candidates = Database::list_resources(conn, Some(category))?;
    available_resources(conn, &candidates, slot)
}

/// Lists resources with an active booking covering the instant `at`.
///
/// Slot ends are inclusive, so a booking from 10:00 to 11:00 covers both
/// 10:00 and 11:00.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] for a standard caller, or a database
/// error.
pub fn list_occupied_resources(
    conn: &Connection,
    capability: Capability,
    at: NaiveDateTime,
) -> Result<Vec<ResourceInstance>> {
    capability.require("list occupied resources")?;
    Database::occupied_resources_at(conn, at)
}
