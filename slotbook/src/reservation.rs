//! Reservation types for tracking resource bookings.
//!
//! A reservation ties one resource instance to exactly one requester for one
//! slot. The requester is a tagged variant so a reservation can never name
//! both a person and a group, or neither.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::slot::Slot;

#[cfg(test)]
mod proptests;

/// Whether a reservation was made by one person or by a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequesterKind {
    /// A single person.
    Individual,
    /// A group of persons.
    Team,
}

impl RequesterKind {
    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Team => "TEAM",
        }
    }
}

impl fmt::Display for RequesterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequesterKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDIVIDUAL" => Ok(Self::Individual),
            "TEAM" => Ok(Self::Team),
            other => Err(ValidationError {
                field: "requester_kind".into(),
                message: format!("unknown requester kind '{other}'"),
            }),
        }
    }
}

/// Lifecycle state of a reservation.
///
/// `Active` may move to `Cancelled` once; `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Holds the resource.
    Active,
    /// Released by a cancellation.
    Cancelled,
}

impl ReservationStatus {
    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("'{s}' is not one of ACTIVE, CANCELLED"),
            }),
        }
    }
}

/// Who holds a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Requester {
    /// Booked by one person.
    Person {
        /// Person identifier.
        id: i64,
        /// Person name.
        name: String,
    },
    /// Booked by a group.
    Group {
        /// Group identifier.
        id: i64,
        /// Group name.
        name: String,
    },
}

impl Requester {
    /// The requester kind implied by the variant.
    #[must_use]
    pub const fn kind(&self) -> RequesterKind {
        match self {
            Self::Person { .. } => RequesterKind::Individual,
            Self::Group { .. } => RequesterKind::Team,
        }
    }

    /// Display name of the person or group.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Person { name, .. } | Self::Group { name, .. } => name,
        }
    }

    /// Storage identifier of the person or group.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Person { id, .. } | Self::Group { id, .. } => *id,
        }
    }
}

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person { name, .. } => write!(f, "{name}"),
            Self::Group { name, .. } => write!(f, "team {name}"),
        }
    }
}

/// A booking of one resource instance for one slot.
///
/// # Examples
///
/// ```
/// use slotbook::{Requester, Reservation, ReservationStatus, Slot};
///
/// let slot: Slot = "2030-01-07T10:00".parse().unwrap();
/// let requester = Requester::Person { id: 1, name: "alice".into() };
/// let reservation = Reservation::builder(3, requester, slot)
///     .resource_label("P3")
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.status(), ReservationStatus::Active);
/// assert_eq!(reservation.end().to_string(), "2030-01-07T11:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<i64>,
    resource_id: i64,
    resource_label: String,
    requester: Requester,
    slot: Slot,
    status: ReservationStatus,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(resource_id: i64, requester: Requester, slot: Slot) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            resource_id,
            resource_label: None,
            requester,
            slot,
            status: ReservationStatus::Active,
            created_at: None,
        }
    }

    /// Storage identifier, `None` until persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Identifier of the booked resource.
    #[must_use]
    pub const fn resource_id(&self) -> i64 {
        self.resource_id
    }

    /// Label of the booked resource.
    #[must_use]
    pub fn resource_label(&self) -> &str {
        &self.resource_label
    }

    /// The requester.
    #[must_use]
    pub const fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Individual or team.
    #[must_use]
    pub const fn requester_kind(&self) -> RequesterKind {
        self.requester.kind()
    }

    /// The booked slot.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Slot end, always one hour after the start.
    #[must_use]
    pub fn end(&self) -> Slot {
        self.slot.end()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Whether the reservation still holds its resource.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<i64>,
    resource_id: i64,
    resource_label: Option<String>,
    requester: Requester,
    slot: Slot,
    status: ReservationStatus,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the storage identifier.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the resource label.
    #[must_use]
    pub fn resource_label(mut self, label: impl Into<String>) -> Self {
        self.resource_label = Some(label.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the requester name is empty or a resource label
    /// was set to an empty string.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.requester.name().trim().is_empty() {
            return Err(ValidationError {
                field: "requester".into(),
                message: "requester name must be non-empty".into(),
            });
        }

        let resource_label = match self.resource_label {
            Some(label) if label.trim().is_empty() => {
                return Err(ValidationError {
                    field: "resource_label".into(),
                    message: "resource label must be non-empty".into(),
                });
            }
            Some(label) => label,
            None => format!("#{}", self.resource_id),
        };

        Ok(Reservation {
            id: self.id,
            resource_id: self.resource_id,
            resource_label,
            requester: self.requester,
            slot: self.slot,
            status: self.status,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
