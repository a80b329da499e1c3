//! Reservation and resource queries.
//!
//! Everything here takes a plain `&Connection` so it can run on its own or
//! inside a caller's transaction (a `Transaction` derefs to `Connection`).
//! Opening and committing transactions is the caller's job.

use std::time::{Duration, SystemTime};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::ResourceDefinition;
use crate::error::{Error, Result};
use crate::reservation::{Requester, Reservation, ReservationStatus};
use crate::resource::{ResourceCategory, ResourceInstance};
use crate::slot::Slot;

use super::connection::Database;
use super::schema::{RESERVATION_COLUMNS, RESERVATION_JOINS};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error<E>(e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

/// Maps a row selected with `RESERVATION_COLUMNS`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let resource_id: i64 = row.get(1)?;
    let label: String = row.get(2)?;
    let person_id: Option<i64> = row.get(3)?;
    let person_name: Option<String> = row.get(4)?;
    let group_id: Option<i64> = row.get(5)?;
    let group_name: Option<String> = row.get(6)?;
    let start_secs: i64 = row.get(7)?;
    let status: String = row.get(8)?;
    let created_secs: i64 = row.get(9)?;

    let requester = match (person_id, group_id) {
        (Some(id), None) => Requester::Person {
            id,
            name: person_name.unwrap_or_default(),
        },
        (None, Some(id)) => Requester::Group {
            id,
            name: group_name.unwrap_or_default(),
        },
        _ => {
            return Err(conversion_error(Error::DatabaseCorruption {
                details: format!("reservation {id} does not have exactly one requester"),
            }))
        }
    };

    let slot = Slot::from_unix_secs(start_secs).map_err(conversion_error)?;
    let status: ReservationStatus = status.parse().map_err(conversion_error)?;

    Reservation::builder(resource_id, requester, slot)
        .id(id)
        .resource_label(label)
        .status(status)
        .created_at(unix_secs_to_systemtime(created_secs))
        .build()
        .map_err(conversion_error)
}

/// Maps a `id, label, category, capacity` row.
pub(super) fn row_to_resource(row: &rusqlite::Row<'_>) -> rusqlite::Result<ResourceInstance> {
    let category: String = row.get(2)?;
    Ok(ResourceInstance {
        id: row.get(0)?,
        label: row.get(1)?,
        category: category.parse().map_err(conversion_error)?,
        capacity: row.get(3)?,
    })
}

const SELECT_RESOURCES: &str = r"
    SELECT id, label, category, capacity
    FROM resources
    ORDER BY id
";

const SELECT_RESOURCES_BY_CATEGORY: &str = r"
    SELECT id, label, category, capacity
    FROM resources
    WHERE category = ?
    ORDER BY id
";

const INSERT_RESOURCE_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO resources (label, category, capacity)
    VALUES (?, ?, ?)
";

const COUNT_OCCUPANCY: &str = r"
    SELECT COUNT(*)
    FROM reservations
    WHERE resource_id = ? AND start_time = ? AND status = 'ACTIVE'
";

const PERSON_CONFLICT: &str = r"
    SELECT EXISTS (
        SELECT 1
        FROM reservations r
        WHERE r.status = 'ACTIVE'
          AND r.start_time = ?2
          AND (
              r.person_id = ?1
              OR r.group_id IN (SELECT team_id FROM team_members WHERE person_id = ?1)
          )
    )
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (resource_id, person_id, group_id, requester_kind, start_time, end_time, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const CANCEL_ACTIVE: &str = r"
    UPDATE reservations
    SET status = 'CANCELLED'
    WHERE id = ? AND status = 'ACTIVE'
";

const SELECT_OCCUPIED_AT: &str = r"
    SELECT res.id, res.label, res.category, res.capacity
    FROM resources res
    WHERE EXISTS (
        SELECT 1 FROM reservations r
        WHERE r.resource_id = res.id
          AND r.status = 'ACTIVE'
          AND r.start_time <= ?1
          AND r.end_time >= ?1
    )
    ORDER BY res.id
";

impl Database {
    /// Lists resource instances in ascending id order, optionally filtered
    /// by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_resources(
        conn: &Connection,
        category: Option<ResourceCategory>,
    ) -> Result<Vec<ResourceInstance>> {
        let rows = match category {
            Some(category) => {
                let mut stmt = conn.prepare_cached(SELECT_RESOURCES_BY_CATEGORY)?;
                let rows = stmt.query_map([category.as_str()], row_to_resource)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare_cached(SELECT_RESOURCES)?;
                let rows = stmt.query_map([], row_to_resource)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(rows)
    }

    /// Inserts a resource unless its label already exists.
    ///
    /// Returns `true` if a row was inserted. Existing resources are never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_resource_if_absent(
        conn: &Connection,
        definition: &ResourceDefinition,
    ) -> Result<bool> {
        let inserted = conn.execute(
            INSERT_RESOURCE_IF_ABSENT,
            params![
                definition.label.trim(),
                definition.category.as_str(),
                definition.effective_capacity(),
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Counts active reservations on a resource at exactly `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn occupancy(conn: &Connection, resource_id: i64, slot: Slot) -> Result<u32> {
        let count: u32 = conn.query_row(
            COUNT_OCCUPANCY,
            params![resource_id, slot.unix_secs()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Whether the person holds an active reservation starting at exactly
    /// `slot`, directly or through any group they belong to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn person_has_conflict(conn: &Connection, person_id: i64, slot: Slot) -> Result<bool> {
        let exists: bool = conn.query_row(
            PERSON_CONFLICT,
            params![person_id, slot.unix_secs()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Inserts a reservation and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the row would
    /// violate the single-requester constraint.
    pub fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<i64> {
        let (person_id, group_id) = match reservation.requester() {
            Requester::Person { id, .. } => (Some(*id), None),
            Requester::Group { id, .. } => (None, Some(*id)),
        };
        conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.resource_id(),
                person_id,
                group_id,
                reservation.requester_kind().as_str(),
                reservation.slot().unix_secs(),
                reservation.end().unix_secs(),
                reservation.status().as_str(),
                systemtime_to_unix_secs(reservation.created_at())?,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Moves an active reservation to cancelled.
    ///
    /// Returns `false` when no active reservation has this id, which covers
    /// both unknown ids and reservations that are already cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn cancel_active_reservation(conn: &Connection, id: i64) -> Result<bool> {
        Ok(conn.execute(CANCEL_ACTIVE, [id])? == 1)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} {RESERVATION_JOINS} WHERE r.id = ?");
        Ok(conn.query_row(&sql, [id], row_to_reservation).optional()?)
    }

    /// Lists reservations newest first, optionally filtered by status.
    ///
    /// Ties on creation time are broken by descending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_reservations(
        conn: &Connection,
        status: Option<ReservationStatus>,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Reservation>> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} {RESERVATION_JOINS}
             WHERE (?1 IS NULL OR r.status = ?1)
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT ?2 OFFSET ?3"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(
            params![status.map(ReservationStatus::as_str), limit, offset],
            row_to_reservation,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Counts reservations, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservations(conn: &Connection, status: Option<ReservationStatus>) -> Result<u64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM reservations WHERE (?1 IS NULL OR status = ?1)",
            [status.map(ReservationStatus::as_str)],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Resources with an active reservation whose slot covers `at`, both
    /// slot ends inclusive, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn occupied_resources_at(
        conn: &Connection,
        at: NaiveDateTime,
    ) -> Result<Vec<ResourceInstance>> {
        let mut stmt = conn.prepare_cached(SELECT_OCCUPIED_AT)?;
        let rows = stmt.query_map([at.and_utc().timestamp()], row_to_resource)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, seed_person, seed_resource, slot_at,
    };

    #[test]
    fn test_list_resources_by_category_in_id_order() {
        let db = create_test_database();
        let conn = db.connection();
        seed_resource(conn, "P1", ResourceCategory::Private, 1);
        seed_resource(conn, "S1", ResourceCategory::Shared, 4);
        seed_resource(conn, "P2", ResourceCategory::Private, 1);

        let private = Database::list_resources(conn, Some(ResourceCategory::Private)).unwrap();
        let labels: Vec<_> = private.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["P1", "P2"]);
        assert_eq!(Database::list_resources(conn, None).unwrap().len(), 3);
    }

    #[test]
    fn test_insert_resource_if_absent_keeps_existing() {
        let db = create_test_database();
        let conn = db.connection();
        let def = ResourceDefinition::new("S1", ResourceCategory::Shared, 4);
        assert!(Database::insert_resource_if_absent(conn, &def).unwrap());

        let changed = ResourceDefinition::new("S1", ResourceCategory::Shared, 9);
        assert!(!Database::insert_resource_if_absent(conn, &changed).unwrap());
        let stored = Database::list_resources(conn, None).unwrap();
        assert_eq!(stored[0].capacity, 4);
    }

    #[test]
    fn test_insert_and_get_reservation() {
        let db = create_test_database();
        let conn = db.connection();
        let room = seed_resource(conn, "P1", ResourceCategory::Private, 1);
        let alice = seed_person(conn, "alice", 30);
        let slot = slot_at(10);

        let reservation = Reservation::builder(
            room.id,
            Requester::Person {
                id: alice.id,
                name: alice.name.clone(),
            },
            slot,
        )
        .build()
        .unwrap();
        let id = Database::insert_reservation(conn, &reservation).unwrap();

        let stored = Database::get_reservation(conn, id).unwrap().unwrap();
        assert_eq!(stored.id(), Some(id));
        assert_eq!(stored.resource_label(), "P1");
        assert_eq!(stored.requester().name(), "alice");
        assert_eq!(stored.slot(), slot);
        assert!(stored.is_active());

        assert!(Database::get_reservation(conn, id + 100).unwrap().is_none());
    }

    #[test]
    fn test_occupancy_counts_only_active_at_exact_start() {
        let db = create_test_database();
        let conn = db.connection();
        let desk = seed_resource(conn, "S1", ResourceCategory::Shared, 4);
        let a = seed_person(conn, "a", 30);
        let b = seed_person(conn, "b", 30);

        let book = |person: &crate::person::Person, slot| {
            let r = Reservation::builder(
                desk.id,
                Requester::Person {
                    id: person.id,
                    name: person.name.clone(),
                },
                slot,
            )
            .build()
            .unwrap();
            Database::insert_reservation(conn, &r).unwrap()
        };
        let first = book(&a, slot_at(10));
        book(&b, slot_at(10));
        book(&a, slot_at(11));

        assert_eq!(Database::occupancy(conn, desk.id, slot_at(10)).unwrap(), 2);
        assert_eq!(Database::occupancy(conn, desk.id, slot_at(11)).unwrap(), 1);
        assert_eq!(Database::occupancy(conn, desk.id, slot_at(12)).unwrap(), 0);

        assert!(Database::cancel_active_reservation(conn, first).unwrap());
        assert_eq!(Database::occupancy(conn, desk.id, slot_at(10)).unwrap(), 1);
    }

    #[test]
    fn test_cancel_only_once() {
        let db = create_test_database();
        let conn = db.connection();
        let room = seed_resource(conn, "P1", ResourceCategory::Private, 1);
        let a = seed_person(conn, "a", 30);
        let r = Reservation::builder(
            room.id,
            Requester::Person { id: a.id, name: a.name },
            slot_at(9),
        )
        .build()
        .unwrap();
        let id = Database::insert_reservation(conn, &r).unwrap();

        assert!(Database::cancel_active_reservation(conn, id).unwrap());
        assert!(!Database::cancel_active_reservation(conn, id).unwrap());
        assert!(!Database::cancel_active_reservation(conn, 999).unwrap());
        let stored = Database::get_reservation(conn, id).unwrap().unwrap();
        assert_eq!(stored.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn test_list_reservations_newest_first_with_filter() {
        let db = create_test_database();
        let conn = db.connection();
        let room = seed_resource(conn, "S1", ResourceCategory::Shared, 4);
        let a = seed_person(conn, "a", 30);

        let mut ids = Vec::new();
        for hour in [9, 10, 11] {
            let r = Reservation::builder(
                room.id,
                Requester::Person {
                    id: a.id,
                    name: a.name.clone(),
                },
                slot_at(hour),
            )
            .created_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000))
            .build()
            .unwrap();
            ids.push(Database::insert_reservation(conn, &r).unwrap());
        }
        Database::cancel_active_reservation(conn, ids[1]).unwrap();

        let all = Database::list_reservations(conn, None, 10, 0).unwrap();
        let listed: Vec<_> = all.iter().filter_map(Reservation::id).collect();
        assert_eq!(listed, [ids[2], ids[1], ids[0]]);

        let cancelled =
            Database::list_reservations(conn, Some(ReservationStatus::Cancelled), 10, 0).unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(
            Database::count_reservations(conn, Some(ReservationStatus::Active)).unwrap(),
            2
        );

        let second_page = Database::list_reservations(conn, None, 2, 2).unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id(), Some(ids[0]));
    }

    #[test]
    fn test_occupied_resources_at_is_inclusive() {
        let db = create_test_database();
        let conn = db.connection();
        let room = seed_resource(conn, "P1", ResourceCategory::Private, 1);
        seed_resource(conn, "P2", ResourceCategory::Private, 1);
        let a = seed_person(conn, "a", 30);
        let r = Reservation::builder(
            room.id,
            Requester::Person { id: a.id, name: a.name },
            slot_at(10),
        )
        .build()
        .unwrap();
        Database::insert_reservation(conn, &r).unwrap();

        for at in [slot_at(10).start(), slot_at(11).start()] {
            let occupied = Database::occupied_resources_at(conn, at).unwrap();
            assert_eq!(occupied.len(), 1);
            assert_eq!(occupied[0].label, "P1");
        }
        assert!(Database::occupied_resources_at(conn, slot_at(12).start())
            .unwrap()
            .is_empty());
        assert!(Database::occupied_resources_at(conn, slot_at(9).start())
            .unwrap()
            .is_empty());
    }
}
