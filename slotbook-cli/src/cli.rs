//! CLI structure and command definitions.
//!
//! Global options and subcommands, defined with clap's derive macros.

use crate::commands::{
    AvailableCommand, BookCommand, BookingsCommand, CancelCommand, CompletionsCommand,
    InitCommand, OccupiedCommand, PeopleCommand, RoomsCommand,
};
use clap::{Parser, Subcommand};
use slotbook::Role;
use std::path::PathBuf;

/// Command-line tool for booking rooms and desks.
#[derive(Parser)]
#[command(name = "slotbook")]
#[command(version, about = "Book rooms and desks in one-hour slots", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SLOTBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SLOTBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SLOTBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Role of the caller; manager and admin may manage bookings
    #[arg(
        long,
        value_enum,
        global = true,
        default_value = "user",
        env = "SLOTBOOK_ROLE",
        ignore_case = true
    )]
    pub role: Role,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book a room or desk
    Book(BookCommand),

    /// Cancel a booking
    Cancel(CancelCommand),

    /// List bookings
    Bookings(BookingsCommand),

    /// List resources in use at an instant
    Occupied(OccupiedCommand),

    /// List resources free at a slot
    Available(AvailableCommand),

    /// List the resource inventory
    Rooms(RoomsCommand),

    /// List known persons
    People(PeopleCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
