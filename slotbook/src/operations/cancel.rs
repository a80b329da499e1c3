//! Booking cancellation.

use crate::database::Database;
use crate::error::Result;
use crate::person::Capability;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Plans the cancellation of one booking.
#[must_use]
pub fn plan_cancel(reservation_id: i64) -> OperationPlan {
    OperationPlan::new(format!("Cancel booking {reservation_id}"))
        .add_action(PlanAction::CancelReservation(reservation_id))
}

/// Cancels an active booking.
///
/// The status change is a single conditional update, so no other lock is
/// taken. Cancelling an unknown or already cancelled booking fails; a
/// repeated cancel never reports success twice.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`](crate::Error::Unauthorized) for a
/// standard caller or [`Error::NotFound`](crate::Error::NotFound) when no
/// active booking has this id.
///
/// # Examples
///
/// ```no_run
/// use slotbook::database::{Database, DatabaseConfig};
/// use slotbook::operations::cancel_booking;
/// use slotbook::Capability;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// cancel_booking(&db, Capability::Privileged, 12).unwrap();
/// ```
pub fn cancel_booking(db: &Database, capability: Capability, reservation_id: i64) -> Result<()> {
    capability.require("cancel booking")?;
    let plan = plan_cancel(reservation_id);
    let seconds = db.config().busy_timeout_secs();
    PlanExecutor::new(db.connection())
        .execute(&plan)
        .map_err(|e| e.with_lock_timeout(seconds))?;
    Ok(())
}
