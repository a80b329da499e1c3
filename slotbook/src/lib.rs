#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # slotbook
//!
//! A library for allocating rooms and desks to people and teams.
//!
//! Bookings cover fixed one-hour slots. Private rooms and conference rooms
//! hold one booking per slot; shared desks take several people up to their
//! capacity. Every allocation is decided inside a single immediate SQLite
//! transaction, so concurrent callers never overbook a resource.
//!
//! ## Core Types
//!
//! - [`Slot`] and [`BusinessHours`]: Hour-aligned time slots
//! - [`ResourceCategory`] and [`ResourceInstance`]: Bookable inventory
//! - [`Person`], [`Group`] and [`Capability`]: Who books, and who may manage
//! - [`Reservation`] and [`Requester`]: The booking ledger
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use slotbook::{BusinessHours, ResourceCategory, Slot};
//!
//! let slot: Slot = "2030-01-07T10:00".parse().unwrap();
//! assert_eq!(slot.end().to_string(), "2030-01-07T11:00");
//! assert!(BusinessHours::default().contains(&slot));
//!
//! let category: ResourceCategory = "shared".parse().unwrap();
//! assert!(!category.is_exclusive());
//! ```

pub mod allocation;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod person;
pub mod reservation;
pub mod resource;
pub mod slot;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BookingOptions, BookingReceipt, BookingRequest, ExecutionResult, OperationPlan, PlanAction,
    PlanExecutor,
};
pub use person::{Capability, Gender, Group, GroupDescriptor, Person, PersonDescriptor, Role};
pub use reservation::{Requester, RequesterKind, Reservation, ReservationStatus, ValidationError};
pub use resource::{ResourceCategory, ResourceInstance};
pub use slot::{BusinessHours, Slot};
