//! SQLite storage for persons, teams, resources and reservations.
//!
//! Query functions are associated functions taking a `&Connection`, so the
//! same call works on a bare connection or inside a transaction opened with
//! [`Database::begin_immediate`].
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::config::default_inventory;
//! use slotbook::database::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
//! db.sync_inventory(&default_inventory()).unwrap();
//!
//! for resource in Database::list_resources(db.connection(), None).unwrap() {
//!     println!("{resource}");
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod people;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
