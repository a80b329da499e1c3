//! Data directory and database initialization.

use std::fs;
use std::path::PathBuf;

use crate::config::ResourceDefinition;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::Result;

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Delete an existing database first, discarding every booking.
    pub overwrite: bool,
    /// Write a commented configuration template if none exists.
    pub create_config: bool,
    /// Resources to make sure exist.
    pub inventory: Vec<ResourceDefinition>,
}

impl InitOptions {
    /// Creates options for `data_dir` with the given inventory.
    #[must_use]
    pub fn new(data_dir: PathBuf, inventory: Vec<ResourceDefinition>) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            inventory,
        }
    }

    /// Sets whether to delete an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a configuration template.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database file was created (or recreated).
    pub database_created: bool,
    /// Whether a configuration template was written.
    pub config_created: bool,
    /// Labels of resources added by this run.
    pub resources_added: Vec<String>,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# slotbook configuration

# Window in which availability may be queried (inclusive)
# business_hours:
#   start: "09:00"
#   end: "18:00"

# Listing page sizes
# pagination:
#   default_page_size: 10
#   max_page_size: 100

# Resolve persons and teams inside the booking transaction
# booking:
#   atomic_requester: false

# Maximum lock wait time in seconds
# maximum_lock_wait_seconds: 5

# Resources to seed; replaces the built-in inventory when set
# inventory:
#   - label: P1
#     category: PRIVATE
#   - label: S1
#     category: SHARED
#     capacity: 4
"#;

/// Initializes the data directory and database and syncs the inventory.
///
/// Safe to run repeatedly: without `overwrite` an existing database is kept
/// and only missing resources are added.
///
/// # Errors
///
/// Returns an error if the directory, database or template cannot be
/// written, or the inventory sync fails.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::default_inventory;
/// use slotbook::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/slotbook"), default_inventory())
///     .with_create_config(true);
/// let result = init_database(&options).unwrap();
/// println!("added {} resources", result.resources_added.len());
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        resources_added: Vec::new(),
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    if db_path.exists() && options.overwrite {
        log::warn!("removing existing database at {}", db_path.display());
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = db_path.clone().into_os_string();
            sidecar.push(suffix);
            let sidecar = PathBuf::from(sidecar);
            if sidecar.exists() {
                fs::remove_file(&sidecar)?;
            }
        }
    }
    result.database_created = !db_path.exists();

    let mut db = Database::open(DatabaseConfig::new(&db_path))?;
    result.resources_added = db.sync_inventory(&options.inventory)?;

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
