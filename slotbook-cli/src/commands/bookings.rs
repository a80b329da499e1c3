//! Bookings command implementation.
//!
//! Lists bookings newest first, one page at a time, in table, JSON, CSV or
//! TSV form.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, resolve_format, GlobalOptions, Listing,
};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::operations::{list_bookings, PageRequest};
use slotbook::{Reservation, ReservationStatus};

/// Column headers for table and delimited output.
const COLUMN_HEADERS: [&str; 7] = [
    "id",
    "resource",
    "kind",
    "requester",
    "slot",
    "status",
    "created_at",
];

/// List bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// Only show bookings with this status (ACTIVE or CANCELLED)
    #[arg(long, value_name = "STATUS", value_parser = parse_status)]
    pub status: Option<ReservationStatus>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Bookings per page
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

fn parse_status(text: &str) -> Result<ReservationStatus, String> {
    text.parse().map_err(|e: slotbook::ValidationError| e.message)
}

fn to_row(r: &Reservation) -> Vec<String> {
    vec![
        r.id().map(|id| id.to_string()).unwrap_or_default(),
        r.resource_label().to_string(),
        r.requester_kind().to_string(),
        r.requester().name().to_string(),
        r.slot().to_string(),
        r.status().to_string(),
        format_timestamp(r.created_at()),
    ]
}

fn to_json(r: &Reservation) -> serde_json::Value {
    serde_json::json!({
        "id": r.id(),
        "resource": r.resource_label(),
        "resource_id": r.resource_id(),
        "kind": r.requester_kind().to_string(),
        "requester": r.requester().name(),
        "requester_id": r.requester().id(),
        "slot": r.slot(),
        "end": r.end(),
        "status": r.status(),
        "created_at": format_timestamp(r.created_at()),
    })
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let page = list_bookings(
            db.connection(),
            global.capability(),
            config.page_limits(),
            self.status,
            PageRequest::new(self.page, self.page_size),
        )?;

        let items: Vec<_> = page.items.iter().map(to_json).collect();
        Listing {
            headers: &COLUMN_HEADERS,
            rows: page.items.iter().map(to_row).collect(),
            items: &items,
        }
        .print(resolve_format(self.format, &config))?;

        if !global.quiet && page.has_next() {
            eprintln!(
                "Page {} of {} ({} bookings); use --page {} for more",
                page.page,
                page.total_pages(),
                page.total,
                page.page + 1
            );
        }
        Ok(())
    }
}
