//! People command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, resolve_format, GlobalOptions, Listing};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::operations::{list_persons, PageRequest};
use slotbook::Person;

const COLUMN_HEADERS: [&str; 5] = ["id", "name", "age", "gender", "role"];

/// List known persons, most recent first.
#[derive(Args)]
pub struct PeopleCommand {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Persons per page
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

fn to_row(p: &Person) -> Vec<String> {
    vec![
        p.id.to_string(),
        p.name.clone(),
        p.age.to_string(),
        p.gender.map(|g| g.to_string()).unwrap_or_default(),
        p.role.to_string(),
    ]
}

impl PeopleCommand {
    /// Execute the people command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let page = list_persons(
            db.connection(),
            global.capability(),
            config.page_limits(),
            PageRequest::new(self.page, self.page_size),
        )?;

        Listing {
            headers: &COLUMN_HEADERS,
            rows: page.items.iter().map(to_row).collect(),
            items: &page.items,
        }
        .print(resolve_format(self.format, &config))?;

        if !global.quiet && page.has_next() {
            eprintln!(
                "Page {} of {} ({} persons); use --page {} for more",
                page.page,
                page.total_pages(),
                page.total,
                page.page + 1
            );
        }
        Ok(())
    }
}
