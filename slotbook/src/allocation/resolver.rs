//! Turns request descriptors into stored persons and teams.

use std::slice;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::person::{Group, GroupDescriptor, Person, PersonDescriptor};
use crate::reservation::{Requester, RequesterKind};

/// The party a booking request names, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Party {
    /// A single person.
    Individual(PersonDescriptor),
    /// A team of persons.
    Team(GroupDescriptor),
}

impl Party {
    /// The requester kind this party will book as.
    #[must_use]
    pub const fn kind(&self) -> RequesterKind {
        match self {
            Self::Individual(_) => RequesterKind::Individual,
            Self::Team(_) => RequesterKind::Team,
        }
    }

    /// Validates every descriptor without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Individual(person) => {
                person.validate("user")?;
            }
            Self::Team(group) => group.validate()?,
        }
        Ok(())
    }
}

/// A party after resolution against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedParty {
    /// The stored person.
    Individual(Person),
    /// The newly created team with its stored members.
    Team(Group),
}

impl ResolvedParty {
    /// The requester kind.
    #[must_use]
    pub const fn kind(&self) -> RequesterKind {
        match self {
            Self::Individual(_) => RequesterKind::Individual,
            Self::Team(_) => RequesterKind::Team,
        }
    }

    /// Everyone who would hold the slot.
    #[must_use]
    pub fn members(&self) -> &[Person] {
        match self {
            Self::Individual(person) => slice::from_ref(person),
            Self::Team(group) => &group.members,
        }
    }

    /// The requester recorded on a reservation.
    #[must_use]
    pub fn requester(&self) -> Requester {
        match self {
            Self::Individual(person) => Requester::Person {
                id: person.id,
                name: person.name.clone(),
            },
            Self::Team(group) => Requester::Group {
                id: group.id,
                name: group.name.clone(),
            },
        }
    }
}

/// Resolves a party: persons are found by name or created, and a team
/// always gets a fresh group row.
///
/// All descriptors are validated before anything is written, so an invalid
/// member never leaves a partial team behind. Whether the writes survive a
/// later rejection depends on which transaction `conn` belongs to.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an invalid descriptor, or a database
/// error if a write fails.
pub fn resolve_party(conn: &Connection, party: &Party) -> Result<ResolvedParty> {
    party.validate()?;

    match party {
        Party::Individual(descriptor) => {
            resolve_person(conn, descriptor, "user").map(ResolvedParty::Individual)
        }
        Party::Team(descriptor) => {
            let members = descriptor
                .members
                .iter()
                .enumerate()
                .map(|(i, member)| resolve_person(conn, member, &format!("team.members[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            let group = Database::create_group(conn, descriptor.name.trim(), members)?;
            Ok(ResolvedParty::Team(group))
        }
    }
}

fn resolve_person(conn: &Connection, descriptor: &PersonDescriptor, field: &str) -> Result<Person> {
    let (name, age) = descriptor.validate(field).map_err(Error::from)?;
    Database::get_or_create_person(conn, &name, age, descriptor.gender)
}
