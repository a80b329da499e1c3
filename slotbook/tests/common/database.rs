//! Shared database test utilities.

use std::path::{Path, PathBuf};

use slotbook::config::{default_inventory, ResourceDefinition};
use slotbook::database::{Database, DatabaseConfig};
use tempfile::TempDir;

/// A database file in a temporary directory that lives as long as the guard.
pub struct TestDatabase {
    _dir: TempDir,
    path: PathBuf,
}

impl TestDatabase {
    /// Creates a database seeded with the stock inventory.
    #[allow(dead_code)]
    pub fn seeded() -> Self {
        Self::with_inventory(&default_inventory())
    }

    /// Creates a database seeded with `inventory`.
    #[allow(dead_code)]
    pub fn with_inventory(inventory: &[ResourceDefinition]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slotbook.db");
        let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
        db.sync_inventory(inventory).unwrap();
        Self { _dir: dir, path }
    }

    /// Path of the database file.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection to the database.
    #[allow(dead_code)]
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }
}
