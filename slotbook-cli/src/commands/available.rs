//! Available command implementation.
//!
//! Shows which instances of a category could still take a booking at a
//! slot. Open to every role.

use crate::commands::rooms::{resource_row, RESOURCE_HEADERS};
use crate::error::CliError;
use crate::utils::{
    load_configuration, now, open_database, parse_instant, resolve_format, GlobalOptions, Listing,
};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::operations::check_availability;
use slotbook::ResourceCategory;

/// List resources free at a slot.
#[derive(Args)]
pub struct AvailableCommand {
    /// Resource category
    #[arg(long, value_enum, ignore_case = true)]
    pub room_type: ResourceCategory,

    /// Slot start, e.g. 2030-01-07T10:00
    #[arg(long, value_name = "DATETIME")]
    pub slot: String,

    /// Treat this as the current time instead of the clock
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let current = match self.now {
            Some(ref text) => parse_instant("now", text)?,
            None => now(),
        };
        let config = load_configuration(global)?;
        let hours = config.business_hours()?;
        let db = open_database(global, &config)?;

        let free = check_availability(
            db.connection(),
            &hours,
            self.room_type.as_str(),
            &self.slot,
            current,
        )?;

        Listing {
            headers: &RESOURCE_HEADERS,
            rows: free.iter().map(resource_row).collect(),
            items: &free,
        }
        .print(resolve_format(self.format, &config))
    }
}
