//! Library exports for slotbook-cli.
//!
//! Exposes the CLI structure for documentation tooling and benchmarks.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
