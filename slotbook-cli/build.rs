//! Build script for slotbook-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR.
//!
//! The command structure is declared here rather than imported, since a
//! build script cannot depend on the crate it builds.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("slotbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book rooms and desks in one-hour slots")
        .long_about(
            "Command-line tool for allocating private rooms, conference rooms and shared desks to people and teams",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SLOTBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SLOTBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("SLOTBOOK_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role of the caller; manager and admin may manage bookings")
                .value_name("ROLE")
                .global(true)
                .default_value("user")
                .env("SLOTBOOK_ROLE"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database and seed the configured inventory"),
            Command::new("book")
                .about("Book a room or desk")
                .long_about("Book the first free resource of a category for a person or team"),
            Command::new("cancel")
                .about("Cancel a booking")
                .long_about("Cancel an active booking by id"),
            Command::new("bookings")
                .about("List bookings")
                .long_about("List bookings newest first, one page at a time"),
            Command::new("occupied")
                .about("List resources in use at an instant")
                .long_about("List resources with an active booking covering an instant"),
            Command::new("available")
                .about("List resources free at a slot")
                .long_about("List instances of a category that could still take a booking"),
            Command::new("rooms")
                .about("List the resource inventory")
                .long_about("List every bookable room and desk area"),
            Command::new("people")
                .about("List known persons")
                .long_about("List persons created by bookings, most recent first"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("slotbook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
