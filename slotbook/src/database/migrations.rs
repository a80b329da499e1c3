//! Database schema management and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CREATED_AT_INDEX, CREATE_GROUPS_TABLE, CREATE_GROUP_MEMBERS_TABLE,
    CREATE_GROUP_SLOT_INDEX, CREATE_MEMBER_PERSON_INDEX, CREATE_METADATA_TABLE,
    CREATE_PERSONS_TABLE, CREATE_PERSON_SLOT_INDEX, CREATE_RESERVATIONS_TABLE,
    CREATE_RESOURCES_TABLE, CREATE_RESOURCE_SLOT_INDEX, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

const SCHEMA_STATEMENTS: [&str; 11] = [
    CREATE_METADATA_TABLE,
    CREATE_PERSONS_TABLE,
    CREATE_GROUPS_TABLE,
    CREATE_GROUP_MEMBERS_TABLE,
    CREATE_RESOURCES_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_RESOURCE_SLOT_INDEX,
    CREATE_PERSON_SLOT_INDEX,
    CREATE_GROUP_SLOT_INDEX,
    CREATE_CREATED_AT_INDEX,
    CREATE_MEMBER_PERSON_INDEX,
];

/// Initializes the database schema.
///
/// Creates all tables and indices and records the schema version. Safe to
/// call only on a database that has not been initialized yet.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use slotbook::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    log::debug!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `Ok(0)` for a database with no metadata table or no version row.
///
/// # Errors
///
/// Returns an error if the stored version is not a number or the query
/// fails for another reason.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<i32>().map_err(|e| Error::DatabaseCorruption {
            details: format!("schema version '{value}' is not a number: {e}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. Any version other than the current one
/// is rejected, since no migrations exist yet.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for a mismatched version, or
/// a database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => initialize_schema(conn),
        CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        }),
    }
}
