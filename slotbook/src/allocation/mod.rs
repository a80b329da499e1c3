//! The allocation engine: who is asking, may they book, and what they get.
//!
//! Each piece is usable on its own and takes its storage access explicitly,
//! so the booking coordinator can run them all against one locked
//! transaction.
//!
//! - [`resolver`]: finds or creates persons and teams.
//! - [`ledger`]: per-person conflicts and per-resource occupancy.
//! - [`eligibility`]: category and headcount rules.
//! - [`selector`]: deterministic first-fit choice of an instance.

pub mod eligibility;
pub mod ledger;
pub mod resolver;
pub mod selector;

pub use eligibility::{check_eligibility, MIN_CONFERENCE_HEADCOUNT, MIN_ELIGIBLE_AGE};
pub use ledger::{ensure_no_conflicts, SlotLedger};
pub use resolver::{resolve_party, Party, ResolvedParty};
pub use selector::{available_resources, has_room, select_first_fit};
