//! Plan types for booking operations.
//!
//! A plan records the writes an operation decided on, so the decision can
//! be inspected, logged or discarded (dry run) before anything is stored.

use crate::reservation::Reservation;

/// A single write to perform when the plan is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a new active reservation.
    CreateReservation(Reservation),

    /// Move an active reservation to cancelled.
    CancelReservation(i64),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => format!(
                "Book {} for {} at {}",
                r.resource_label(),
                r.requester(),
                r.slot()
            ),
            Self::CancelReservation(id) => format!("Cancel booking {id}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel booking 4");
    /// assert_eq!(plan.description, "Cancel booking 4");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::operations::{OperationPlan, PlanAction};
    ///
    /// let plan = OperationPlan::new("Cancel").add_action(PlanAction::CancelReservation(4));
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// The reservation the plan would create, if any.
    #[must_use]
    pub fn reservation(&self) -> Option<&Reservation> {
        self.actions.iter().find_map(|action| match action {
            PlanAction::CreateReservation(r) => Some(r),
            PlanAction::CancelReservation(_) => None,
        })
    }
}
