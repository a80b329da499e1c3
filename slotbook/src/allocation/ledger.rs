//! Slot conflict and occupancy lookups.
//!
//! The [`SlotLedger`] trait is the seam between allocation decisions and
//! storage. The real implementation queries `SQLite` on whatever connection
//! or transaction it is given; tests substitute a mock.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::person::Person;
use crate::slot::Slot;

/// Reads of active reservations at an exact slot start.
///
/// Both checks compare start times for equality. Slots are fixed length
/// and hour-aligned, so two slots either coincide or do not overlap.
#[cfg_attr(test, mockall::automock)]
pub trait SlotLedger {
    /// Whether the person already holds an active reservation at `slot`,
    /// on their own or as a member of any team.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn person_has_conflict(&self, person_id: i64, slot: Slot) -> Result<bool>;

    /// Number of active reservations on the resource at `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn occupancy(&self, resource_id: i64, slot: Slot) -> Result<u32>;
}

impl SlotLedger for Connection {
    fn person_has_conflict(&self, person_id: i64, slot: Slot) -> Result<bool> {
        Database::person_has_conflict(self, person_id, slot)
    }

    fn occupancy(&self, resource_id: i64, slot: Slot) -> Result<u32> {
        Database::occupancy(self, resource_id, slot)
    }
}

/// Fails with [`Error::SlotAlreadyTaken`] naming the first person in
/// `people` who already holds a reservation at `slot`.
///
/// Team bookings pass every member, so double booking through two teams or
/// through a team and an individual booking is caught.
///
/// # Errors
///
/// Returns [`Error::SlotAlreadyTaken`] on the first conflict, or a storage
/// error from the ledger.
pub fn ensure_no_conflicts<L>(ledger: &L, people: &[Person], slot: Slot) -> Result<()>
where
    L: SlotLedger + ?Sized,
{
    for person in people {
        if ledger.person_has_conflict(person.id, slot)? {
            log::debug!("{} already holds a reservation at {slot}", person.name);
            return Err(Error::SlotAlreadyTaken {
                person: person.name.clone(),
                slot,
            });
        }
    }
    Ok(())
}
