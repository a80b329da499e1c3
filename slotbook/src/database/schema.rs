//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Persons, unique by name.
pub const CREATE_PERSONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        age INTEGER NOT NULL CHECK (age >= 0),
        gender TEXT CHECK (gender IN ('M', 'F', 'O')),
        role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin', 'manager'))
    )";

/// Teams, one per team booking request.
pub const CREATE_GROUPS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )";

/// Team membership; the primary key keeps members unique.
pub const CREATE_GROUP_MEMBERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS team_members (
        team_id INTEGER NOT NULL REFERENCES teams(id),
        person_id INTEGER NOT NULL REFERENCES persons(id),
        position INTEGER NOT NULL,
        PRIMARY KEY (team_id, person_id)
    )";

/// Bookable resource instances.
pub const CREATE_RESOURCES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS resources (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        label TEXT NOT NULL UNIQUE,
        category TEXT NOT NULL CHECK (category IN ('PRIVATE', 'CONFERENCE', 'SHARED')),
        capacity INTEGER NOT NULL CHECK (capacity >= 1)
    )";

/// Reservations.
///
/// The CHECK constraint enforces exactly one requester reference and a
/// `requester_kind` consistent with it.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        resource_id INTEGER NOT NULL REFERENCES resources(id),
        person_id INTEGER REFERENCES persons(id),
        group_id INTEGER REFERENCES teams(id),
        requester_kind TEXT NOT NULL,
        start_time INTEGER NOT NULL,
        end_time INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'CANCELLED')),
        created_at INTEGER NOT NULL,
        CHECK (
            (person_id IS NOT NULL AND group_id IS NULL AND requester_kind = 'INDIVIDUAL')
            OR (person_id IS NULL AND group_id IS NOT NULL AND requester_kind = 'TEAM')
        ),
        CHECK (end_time = start_time + 3600)
    )";

/// Occupancy lookups by resource and slot.
pub const CREATE_RESOURCE_SLOT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_resource_slot
    ON reservations(resource_id, start_time, status)";

/// Conflict lookups for individual bookings.
pub const CREATE_PERSON_SLOT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_person_slot
    ON reservations(person_id, start_time, status)";

/// Conflict lookups for team bookings.
pub const CREATE_GROUP_SLOT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_group_slot
    ON reservations(group_id, start_time, status)";

/// Newest-first listings.
pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_created_at ON reservations(created_at)";

/// Member lookup by person.
pub const CREATE_MEMBER_PERSON_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_team_members_person ON team_members(person_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for a reservation row, joined with its resource and
/// requester names.
pub const RESERVATION_COLUMNS: &str = r"
    r.id, r.resource_id, res.label, r.person_id, p.name, r.group_id, g.name,
    r.start_time, r.status, r.created_at";

/// Join clause matching [`RESERVATION_COLUMNS`].
pub const RESERVATION_JOINS: &str = r"
    FROM reservations r
    JOIN resources res ON res.id = r.resource_id
    LEFT JOIN persons p ON p.id = r.person_id
    LEFT JOIN teams g ON g.id = r.group_id";
