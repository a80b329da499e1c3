//! Person and team storage.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::person::{Gender, Group, Person, Role};

use super::connection::Database;

const INSERT_PERSON_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO persons (name, age, gender)
    VALUES (?, ?, ?)
";

const SELECT_PERSON_BY_NAME: &str = r"
    SELECT id, name, age, gender, role FROM persons WHERE name = ?
";

const SELECT_PERSON_BY_ID: &str = r"
    SELECT id, name, age, gender, role FROM persons WHERE id = ?
";

const SELECT_PERSONS_PAGE: &str = r"
    SELECT id, name, age, gender, role
    FROM persons
    ORDER BY id DESC
    LIMIT ? OFFSET ?
";

const INSERT_TEAM: &str = "INSERT INTO teams (name) VALUES (?)";

const INSERT_TEAM_MEMBER: &str = r"
    INSERT OR IGNORE INTO team_members (team_id, person_id, position)
    VALUES (?, ?, ?)
";

const SELECT_TEAM_MEMBERS: &str = r"
    SELECT p.id, p.name, p.age, p.gender, p.role
    FROM team_members m
    JOIN persons p ON p.id = m.person_id
    WHERE m.team_id = ?
    ORDER BY m.position
";

fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    let gender: Option<String> = row.get(3)?;
    let role: String = row.get(4)?;
    let to_sql_err = |e| rusqlite::Error::ToSqlConversionFailure(Box::new(e));
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: gender
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(to_sql_err)?,
        role: role.parse::<Role>().map_err(to_sql_err)?,
    })
}

impl Database {
    /// Returns the person with this exact name, creating them if absent.
    ///
    /// An existing person keeps their stored age and gender. The insert is
    /// a single statement, so two callers racing on one name both end up
    /// with the same row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or lookup fails.
    pub fn get_or_create_person(
        conn: &Connection,
        name: &str,
        age: u32,
        gender: Option<Gender>,
    ) -> Result<Person> {
        let inserted = conn.execute(
            INSERT_PERSON_IF_ABSENT,
            params![name, age, gender.map(Gender::code)],
        )?;
        if inserted > 0 {
            log::debug!("created person '{name}'");
        }
        Ok(conn.query_row(SELECT_PERSON_BY_NAME, [name], row_to_person)?)
    }

    /// Looks up a person by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_person(conn: &Connection, id: i64) -> Result<Option<Person>> {
        Ok(conn
            .query_row(SELECT_PERSON_BY_ID, [id], row_to_person)
            .optional()?)
    }

    /// Lists persons, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_persons(conn: &Connection, limit: u32, offset: u64) -> Result<Vec<Person>> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare_cached(SELECT_PERSONS_PAGE)?;
        let rows = stmt.query_map(params![limit, offset], row_to_person)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Total number of persons.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_persons(conn: &Connection) -> Result<u64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Creates a team with the given members.
    ///
    /// Repeated members are stored once, at their first position.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn create_group(conn: &Connection, name: &str, members: Vec<Person>) -> Result<Group> {
        conn.execute(INSERT_TEAM, [name])?;
        let group = Group::new(conn.last_insert_rowid(), name, members);

        let mut stmt = conn.prepare_cached(INSERT_TEAM_MEMBER)?;
        for (position, member) in group.members.iter().enumerate() {
            let position = i64::try_from(position).unwrap_or(i64::MAX);
            stmt.execute(params![group.id, member.id, position])?;
        }
        log::debug!(
            "created team '{}' with {} member(s)",
            group.name,
            group.members.len()
        );
        Ok(group)
    }

    /// Loads a team and its members.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_group(conn: &Connection, id: i64) -> Result<Option<Group>> {
        let name: Option<String> = conn
            .query_row("SELECT name FROM teams WHERE id = ?", [id], |row| row.get(0))
            .optional()?;
        let Some(name) = name else {
            return Ok(None);
        };

        let mut stmt = conn.prepare_cached(SELECT_TEAM_MEMBERS)?;
        let members = stmt
            .query_map([id], row_to_person)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(Group::new(id, name, members)))
    }
}
