//! Error types for the slotbook library.
//!
//! Every booking rule rejection has its own variant so callers can tell a
//! full room from a double-booked person without parsing messages. Storage,
//! configuration and I/O failures are carried alongside them.

use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::RequesterKind;
use crate::resource::ResourceCategory;
use crate::slot::Slot;

/// Result type alias for operations that may fail with a slotbook error.
///
/// # Examples
///
/// ```
/// use slotbook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the slotbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A request field was missing or malformed.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requester kind is not allowed to book this category.
    #[error("{category} resources cannot be booked by {kind} requesters")]
    CategoryMismatch {
        /// The requested category.
        category: ResourceCategory,
        /// The kind of requester that asked for it.
        kind: RequesterKind,
    },

    /// A conference booking did not have enough members old enough to count.
    #[error("at least {required} members aged 10 or older are required, found {eligible}")]
    InsufficientEligibleMembers {
        /// Minimum eligible headcount.
        required: usize,
        /// Eligible headcount of the group.
        eligible: usize,
    },

    /// A person already holds an active reservation at this slot.
    #[error("{person} already has a booking at {slot}")]
    SlotAlreadyTaken {
        /// Name of the conflicting person.
        person: String,
        /// The contested slot.
        slot: Slot,
    },

    /// Every instance of the category is full at this slot.
    #[error("no {category} resource is available at {slot}")]
    NoAvailableResource {
        /// The requested category.
        category: ResourceCategory,
        /// The requested slot.
        slot: Slot,
    },

    /// The requested entity was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The entity that was not found.
        resource: String,
    },

    /// An availability query named a slot that cannot be booked.
    #[error("invalid slot '{slot}': {reason}")]
    InvalidSlot {
        /// The slot as supplied by the caller.
        slot: String,
        /// Why the slot was rejected.
        reason: String,
    },

    /// The caller lacks the privileged capability for this operation.
    #[error("{operation} requires a manager or admin role")]
    Unauthorized {
        /// The operation that was refused.
        operation: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A request document could not be parsed.
    #[error("invalid request document: {0}")]
    Request(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of an [`Error`].
///
/// Callers that only need to branch on the failure category (for exit
/// codes or status mapping) match on this instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Requester kind not allowed for the category.
    CategoryMismatch,
    /// Too few members aged 10 or older.
    InsufficientEligibleMembers,
    /// A person is already booked at the slot.
    SlotAlreadyTaken,
    /// The category is exhausted at the slot.
    NoAvailableResource,
    /// No such active entity.
    NotFound,
    /// Availability query outside the bookable window.
    InvalidSlot,
    /// Missing privileged capability.
    Unauthorized,
    /// Storage, configuration or I/O failure.
    Internal,
}

impl Error {
    /// Returns the coarse kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::{Error, ErrorKind};
    ///
    /// let err = Error::NotFound { resource: "booking 7".into() };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::Request(_) => ErrorKind::Validation,
            Self::CategoryMismatch { .. } => ErrorKind::CategoryMismatch,
            Self::InsufficientEligibleMembers { .. } => ErrorKind::InsufficientEligibleMembers,
            Self::SlotAlreadyTaken { .. } => ErrorKind::SlotAlreadyTaken,
            Self::NoAvailableResource { .. } => ErrorKind::NoAvailableResource,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidSlot { .. } => ErrorKind::InvalidSlot,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::InvalidPath { .. }
            | Self::LockTimeout { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Internal,
        }
    }

    /// Converts a `SQLITE_BUSY` failure into [`Error::LockTimeout`].
    ///
    /// Any other error is returned unchanged.
    #[must_use]
    pub fn with_lock_timeout(self, seconds: u64) -> Self {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(ref e, _))
                if e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Self::LockTimeout { seconds }
            }
            other => other,
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
