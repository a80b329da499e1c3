//! People, groups and the caller capability.
//!
//! Persons are looked up by name and created on first use. Groups are
//! created fresh for every team booking. The descriptors are what a booking
//! request carries before resolution against storage.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::ValidationError;

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
    /// Other.
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Single-letter storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "O" => Ok(Self::Other),
            _ => Err(ValidationError {
                field: "gender".into(),
                message: format!("'{s}' is not one of M, F, O"),
            }),
        }
    }
}

/// Role stored on a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary user.
    #[default]
    User,
    /// Administrator.
    Admin,
    /// Manager.
    Manager,
}

impl Role {
    /// Storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Manager => "manager",
        }
    }

    /// Whether this role grants the privileged capability.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            _ => Err(ValidationError {
                field: "role".into(),
                message: format!("'{s}' is not one of user, admin, manager"),
            }),
        }
    }
}

/// The authorization decision made outside the engine.
///
/// Operations that require privilege take a `Capability` and refuse with
/// [`Error::Unauthorized`] when it is [`Capability::Standard`].
///
/// # Examples
///
/// ```
/// use slotbook::{Capability, Role};
///
/// assert!(Capability::from_role(Role::Manager).require("cancel").is_ok());
/// assert!(Capability::from_role(Role::User).require("cancel").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// An ordinary caller.
    Standard,
    /// A manager or admin.
    Privileged,
}

impl Capability {
    /// Derives the capability from a caller role.
    #[must_use]
    pub const fn from_role(role: Role) -> Self {
        if role.is_privileged() {
            Self::Privileged
        } else {
            Self::Standard
        }
    }

    /// Fails unless the caller is privileged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] naming `operation`.
    pub fn require(self, operation: &str) -> Result<()> {
        match self {
            Self::Privileged => Ok(()),
            Self::Standard => Err(Error::Unauthorized {
                operation: operation.to_string(),
            }),
        }
    }
}

/// A stored person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Storage identifier.
    pub id: i64,
    /// Name, unique across persons.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Optional gender.
    pub gender: Option<Gender>,
    /// Stored role.
    pub role: Role,
}

/// A person as described in a booking request.
///
/// `age` is signed so that negative input can be reported rather than
/// rejected by the deserializer with a less useful message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDescriptor {
    /// Person name; the lookup key.
    pub name: String,
    /// Age in years.
    #[serde(default)]
    pub age: Option<i64>,
    /// Optional gender.
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl PersonDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i64, gender: Option<Gender>) -> Self {
        Self {
            name: name.into(),
            age: Some(age),
            gender,
        }
    }

    /// Checks the descriptor and returns the trimmed name and age.
    ///
    /// `field` prefixes error field names, e.g. `team.members[2]`.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or the age is missing, negative or too large.
    pub fn validate(&self, field: &str) -> std::result::Result<(String, u32), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError {
                field: format!("{field}.name"),
                message: "name must be non-empty".into(),
            });
        }
        let age = self.age.ok_or_else(|| ValidationError {
            field: format!("{field}.age"),
            message: "age is required".into(),
        })?;
        let age = u32::try_from(age).map_err(|_| ValidationError {
            field: format!("{field}.age"),
            message: format!("age must be a non-negative integer, got {age}"),
        })?;
        Ok((name.to_string(), age))
    }
}

/// A team as described in a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    /// Team name.
    pub name: String,
    /// Team members.
    pub members: Vec<PersonDescriptor>,
}

impl GroupDescriptor {
    /// Checks the whole team before anything is written.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty, there are no members, or any member is
    /// invalid.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError {
                field: "team.name".into(),
                message: "team name must be non-empty".into(),
            });
        }
        if self.members.is_empty() {
            return Err(ValidationError {
                field: "team.members".into(),
                message: "a team needs at least one member".into(),
            });
        }
        for (i, member) in self.members.iter().enumerate() {
            member.validate(&format!("team.members[{i}]"))?;
        }
        Ok(())
    }
}

/// A stored group with its resolved members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Storage identifier.
    pub id: i64,
    /// Team name.
    pub name: String,
    /// Unique members, in first-mention order.
    pub members: Vec<Person>,
}

impl Group {
    /// Builds a group, dropping repeated members.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, members: Vec<Person>) -> Self {
        let mut seen = HashSet::new();
        let members = members.into_iter().filter(|p| seen.insert(p.id)).collect();
        Self {
            id,
            name: name.into(),
            members,
        }
    }
}
