//! Occupied command implementation.

use crate::commands::rooms::{resource_row, RESOURCE_HEADERS};
use crate::error::CliError;
use crate::utils::{
    load_configuration, now, open_database, parse_instant, resolve_format, GlobalOptions, Listing,
};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::operations::list_occupied_resources;

/// List resources with an active booking covering an instant.
#[derive(Args)]
pub struct OccupiedCommand {
    /// Instant to check (default: now)
    #[arg(long, value_name = "DATETIME")]
    pub at: Option<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl OccupiedCommand {
    /// Execute the occupied command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let at = match self.at {
            Some(ref text) => parse_instant("at", text)?,
            None => now(),
        };
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let occupied = list_occupied_resources(db.connection(), global.capability(), at)?;
        Listing {
            headers: &RESOURCE_HEADERS,
            rows: occupied.iter().map(resource_row).collect(),
            items: &occupied,
        }
        .print(resolve_format(self.format, &config))
    }
}
