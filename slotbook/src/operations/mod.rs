//! Booking operations using the plan-execute pattern.
//!
//! Planning reads the ledger and decides what to write; execution applies
//! the plan. Splitting the two gives dry runs for free and keeps rejection
//! reasons separate from storage failures.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: checks conflicts and eligibility, then picks a resource
//! 2. **Execution**: inserts or cancels the reservation
//!
//! Booking runs both phases inside one immediate transaction, so two callers
//! can never be granted the last free resource for the same slot.
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::config::ConfigBuilder;
//! use slotbook::operations::{create_booking, BookingOptions, BookingRequest};
//! use slotbook::{Capability, Database, DatabaseConfig, PersonDescriptor};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let request = BookingRequest::individual(
//!     "PRIVATE",
//!     "2030-01-07T10:00",
//!     PersonDescriptor::new("alice", 30, None),
//! );
//!
//! let receipt = create_booking(
//!     &mut db,
//!     &config,
//!     Capability::Privileged,
//!     &request,
//!     BookingOptions::default(),
//! )
//! .unwrap();
//! println!("booked {} as #{:?}", receipt.resource_label, receipt.reservation_id);
//! ```

pub mod availability;
pub mod book;
pub mod cancel;
pub mod executor;
pub mod init;
pub mod listing;
pub mod plan;

pub use availability::{check_availability, list_occupied_resources, validate_query_slot};
pub use book::{
    create_booking, plan_booking, BookingOptions, BookingReceipt, BookingRequest, ParsedBooking,
};
pub use cancel::{cancel_booking, plan_cancel};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use listing::{
    get_reservation, list_bookings, list_persons, list_resources, Page, PageRequest,
    ReservationDetails,
};
pub use plan::{OperationPlan, PlanAction};
