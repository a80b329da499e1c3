//! Rooms command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, resolve_format, GlobalOptions, Listing};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::operations::list_resources;
use slotbook::{ResourceCategory, ResourceInstance};

/// Column headers shared by every resource listing.
pub const RESOURCE_HEADERS: [&str; 4] = ["id", "label", "category", "capacity"];

/// One output row for a resource.
pub fn resource_row(r: &ResourceInstance) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.label.clone(),
        r.category.to_string(),
        r.capacity.to_string(),
    ]
}

/// List the resource inventory.
#[derive(Args)]
pub struct RoomsCommand {
    /// Only show this category
    #[arg(long, value_enum, ignore_case = true)]
    pub room_type: Option<ResourceCategory>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let resources = list_resources(db.connection(), self.room_type)?;
        Listing {
            headers: &RESOURCE_HEADERS,
            rows: resources.iter().map(resource_row).collect(),
            items: &resources,
        }
        .print(resolve_format(self.format, &config))
    }
}
