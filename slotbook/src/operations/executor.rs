//! Plan execution engine.
//!
//! The executor applies a plan's writes on the connection it is given. When
//! that connection is a transaction, committing is left to the caller, so
//! the decisions that produced the plan and the writes share one lock.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether this was a dry run (no changes made).
    pub dry_run: bool,

    /// Id of the reservation created by the plan, if it created one.
    pub reservation_id: Option<i64>,
}

/// Executes operation plans against a connection.
///
/// # Examples
///
/// ```no_run
/// use slotbook::database::{Database, DatabaseConfig};
/// use slotbook::operations::{OperationPlan, PlanAction, PlanExecutor};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// let tx = db.begin_immediate().unwrap();
/// let plan = OperationPlan::new("Cancel").add_action(PlanAction::CancelReservation(3));
///
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(!result.dry_run);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the plan is reported but nothing is written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when a cancellation finds no active
    /// reservation, or a database error if a write fails. Earlier writes in
    /// the plan are not undone here; run the plan inside a transaction to
    /// get all-or-nothing behaviour.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            for action in &plan.actions {
                log::debug!("dry run: {}", action.description());
            }
            return Ok(ExecutionResult {
                dry_run: true,
                reservation_id: None,
            });
        }

        let mut reservation_id = None;
        for action in &plan.actions {
            if let Some(id) = self.execute_action(action)? {
                reservation_id = Some(id);
            }
        }
        Ok(ExecutionResult {
            dry_run: false,
            reservation_id,
        })
    }

    fn execute_action(&self, action: &PlanAction) -> Result<Option<i64>> {
        match action {
            PlanAction::CreateReservation(reservation) => {
                let id = Database::insert_reservation(self.conn, reservation)?;
                log::info!("{} (booking {id})", action.description());
                Ok(Some(id))
            }
            PlanAction::CancelReservation(id) => {
                if !Database::cancel_active_reservation(self.conn, *id)? {
                    return Err(Error::NotFound {
                        resource: format!("active booking {id}"),
                    });
                }
                log::info!("cancelled booking {id}");
                Ok(None)
            }
        }
    }
}
