//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use slotbook::operations::cancel_booking;

/// Cancel an active booking.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking id, as printed by `book`
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        cancel_booking(&db, global.capability(), self.id)?;

        if !global.quiet {
            eprintln!("Cancelled booking {}", self.id);
        }
        Ok(())
    }
}
