//! Booking planning and execution.
//!
//! A booking is decided and written under one write lock: conflict checks,
//! eligibility, first-fit selection and the insert all run inside the same
//! immediate transaction, so two concurrent bookings cannot both take the
//! last place on a resource.

use std::time::SystemTime;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::allocation::{
    check_eligibility, ensure_no_conflicts, resolve_party, select_first_fit, Party, ResolvedParty,
};
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::person::{Capability, GroupDescriptor, PersonDescriptor};
use crate::reservation::{Requester, Reservation};
use crate::resource::ResourceCategory;
use crate::slot::Slot;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// A booking request as submitted by a caller.
///
/// Exactly one of `user` and `team` must be present.
///
/// # Examples
///
/// ```
/// use slotbook::operations::BookingRequest;
///
/// let request = BookingRequest::from_json(
///     r#"{"room_type": "SHARED", "slot": "2030-01-07T10:00", "user": {"name": "alice", "age": 30}}"#,
/// ).unwrap();
/// assert!(request.user.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Requested category, case-insensitive.
    pub room_type: String,
    /// Slot start as an ISO-8601 date-time.
    pub slot: String,
    /// The individual requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PersonDescriptor>,
    /// The team requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<GroupDescriptor>,
}

impl BookingRequest {
    /// A request on behalf of one person.
    #[must_use]
    pub fn individual(
        room_type: impl Into<String>,
        slot: impl Into<String>,
        user: PersonDescriptor,
    ) -> Self {
        Self {
            room_type: room_type.into(),
            slot: slot.into(),
            user: Some(user),
            team: None,
        }
    }

    /// A request on behalf of a team.
    #[must_use]
    pub fn team(room_type: impl Into<String>, slot: impl Into<String>, team: GroupDescriptor) -> Self {
        Self {
            room_type: room_type.into(),
            slot: slot.into(),
            user: None,
            team: Some(team),
        }
    }

    /// Parses a JSON request document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the document is not a valid request.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks every field and returns the typed request.
    ///
    /// Nothing is looked up in storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unknown category, an unparsable
    /// slot, a missing or doubled requester, or an invalid descriptor.
    pub fn parse(&self) -> Result<ParsedBooking> {
        let category: ResourceCategory = self.room_type.parse()?;
        let slot = Slot::parse(&self.slot)?;
        let party = match (&self.user, &self.team) {
            (Some(user), None) => Party::Individual(user.clone()),
            (None, Some(team)) => Party::Team(team.clone()),
            (None, None) => {
                return Err(Error::Validation {
                    field: "requester".into(),
                    message: "either user or team is required".into(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(Error::Validation {
                    field: "requester".into(),
                    message: "give either user or team, not both".into(),
                })
            }
        };
        party.validate()?;
        Ok(ParsedBooking {
            category,
            slot,
            party,
        })
    }
}

/// A validated booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBooking {
    /// Requested category.
    pub category: ResourceCategory,
    /// Requested slot.
    pub slot: Slot,
    /// Who is asking.
    pub party: Party,
}

/// Options for a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingOptions {
    /// Decide the booking but roll everything back.
    pub dry_run: bool,
}

impl BookingOptions {
    /// Sets the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a booking produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    /// Id of the new reservation; `None` for a dry run.
    pub reservation_id: Option<i64>,
    /// Id of the assigned resource.
    pub resource_id: i64,
    /// Label of the assigned resource.
    pub resource_label: String,
    /// The booked slot.
    pub slot: Slot,
    /// Who holds the booking.
    pub requester: Requester,
    /// Whether the booking was rolled back.
    pub dry_run: bool,
}

/// Plans a booking for an already resolved party.
///
/// Runs the conflict check for every member, then the eligibility rules,
/// then first-fit selection. `conn` should be a transaction holding the
/// write lock, so the plan is still valid when it is executed.
///
/// # Errors
///
/// Returns [`Error::SlotAlreadyTaken`], [`Error::CategoryMismatch`],
/// [`Error::InsufficientEligibleMembers`] or
/// [`Error::NoAvailableResource`], or a database error.
pub fn plan_booking(
    conn: &Connection,
    party: &ResolvedParty,
    category: ResourceCategory,
    slot: Slot,
) -> Result<OperationPlan> {
    ensure_no_conflicts(conn, party.members(), slot)?;
    check_eligibility(category, party.kind(), party.members())?;

    let candidates = Database::list_resources(conn, Some(category))?;
    let resource = select_first_fit(conn, category, &candidates, slot)?;

    let reservation = Reservation::builder(resource.id, party.requester(), slot)
        .resource_label(resource.label)
        .created_at(SystemTime::now())
        .build()?;

    Ok(OperationPlan::new(format!("Book {category} at {slot}"))
        .add_action(PlanAction::CreateReservation(reservation)))
}

/// Creates a booking.
///
/// By default persons and teams are resolved and committed before the
/// booking transaction starts, so a rejected booking can still leave new
/// person or team rows behind. With `booking.atomic_requester` enabled, or
/// for a dry run, resolution joins the booking transaction and a rejection
/// leaves nothing behind.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] for a standard caller,
/// [`Error::Validation`] for a malformed request, any booking rule
/// rejection from [`plan_booking`], or [`Error::LockTimeout`] if the write
/// lock is not granted in time.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::ConfigBuilder;
/// use slotbook::database::{Database, DatabaseConfig};
/// use slotbook::operations::{create_booking, BookingOptions, BookingRequest};
/// use slotbook::{Capability, PersonDescriptor};
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// db.sync_inventory(&config.inventory()).unwrap();
///
/// let request = BookingRequest::individual(
///     "PRIVATE",
///     "2030-01-07T10:00",
///     PersonDescriptor::new("alice", 30, None),
/// );
/// let receipt = create_booking(
///     &mut db,
///     &config,
///     Capability::Privileged,
///     &request,
///     BookingOptions::default(),
/// )
/// .unwrap();
/// println!("booked {}", receipt.resource_label);
/// ```
pub fn create_booking(
    db: &mut Database,
    config: &Config,
    capability: Capability,
    request: &BookingRequest,
    options: BookingOptions,
) -> Result<BookingReceipt> {
    capability.require("create booking")?;
    let booking = request.parse()?;
    let resolve_inside = options.dry_run || config.atomic_requester();

    let resolved = if resolve_inside {
        None
    } else {
        let tx = db.begin_immediate()?;
        let party = resolve_party(&tx, &booking.party)?;
        tx.commit()?;
        Some(party)
    };

    let tx = db.begin_immediate()?;
    let party = match resolved {
        Some(party) => party,
        None => resolve_party(&tx, &booking.party)?,
    };

    let plan = match plan_booking(&tx, &party, booking.category, booking.slot) {
        Ok(plan) => plan,
        Err(e) => {
            log::info!(
                "rejected {} booking for {}: {e}",
                booking.category,
                party.requester()
            );
            return Err(e);
        }
    };

    let executor = if options.dry_run {
        PlanExecutor::new(&tx).dry_run()
    } else {
        PlanExecutor::new(&tx)
    };
    let result = executor.execute(&plan)?;

    let Some(reservation) = plan.reservation().cloned() else {
        return Err(Error::DatabaseCorruption {
            details: "booking plan holds no reservation".into(),
        });
    };

    if options.dry_run {
        tx.rollback()?;
    } else {
        tx.commit()?;
    }

    Ok(BookingReceipt {
        reservation_id: result.reservation_id,
        resource_id: reservation.resource_id(),
        resource_label: reservation.resource_label().to_string(),
        slot: reservation.slot(),
        requester: reservation.requester().clone(),
        dry_run: result.dry_run,
    })
}
