//! Bookable resource categories and instances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reservation::{RequesterKind, ValidationError};

/// The three kinds of bookable space.
///
/// # Examples
///
/// ```
/// use slotbook::{RequesterKind, ResourceCategory};
///
/// let category: ResourceCategory = "CONFERENCE".parse().unwrap();
/// assert_eq!(category.required_kind(), RequesterKind::Team);
/// assert!(category.is_exclusive());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceCategory {
    /// Single-occupant room, exclusive to one person.
    #[value(name = "PRIVATE", alias = "private")]
    Private,
    /// Group room, exclusive to one team.
    #[value(name = "CONFERENCE", alias = "conference")]
    Conference,
    /// Desk area shared by up to `capacity` individuals.
    #[value(name = "SHARED", alias = "shared")]
    Shared,
}

impl ResourceCategory {
    /// All categories in a stable order.
    pub const ALL: [Self; 3] = [Self::Private, Self::Conference, Self::Shared];

    /// The stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Conference => "CONFERENCE",
            Self::Shared => "SHARED",
        }
    }

    /// Whether a single reservation occupies the whole instance.
    #[must_use]
    pub const fn is_exclusive(self) -> bool {
        !matches!(self, Self::Shared)
    }

    /// The requester kind allowed to book this category.
    #[must_use]
    pub const fn required_kind(self) -> RequesterKind {
        match self {
            Self::Conference => RequesterKind::Team,
            Self::Private | Self::Shared => RequesterKind::Individual,
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError {
                field: "room_type".into(),
                message: format!("'{s}' is not one of PRIVATE, CONFERENCE, SHARED"),
            })
    }
}

/// A concrete bookable room or desk area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInstance {
    /// Storage identifier; first-fit selection scans in ascending id order.
    pub id: i64,
    /// Unique human-facing label such as `P1`.
    pub label: String,
    /// Category of the instance.
    pub category: ResourceCategory,
    /// Maximum concurrent active reservations per slot.
    pub capacity: u32,
}

impl fmt::Display for ResourceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, capacity {})", self.label, self.category, self.capacity)
    }
}
