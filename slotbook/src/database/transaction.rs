//! Multi-statement writes that commit as one unit.

use crate::config::ResourceDefinition;
use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Adds every resource definition whose label is not stored yet.
    ///
    /// Runs in a single immediate transaction: either all missing labels are
    /// inserted or none are. Existing resources are left untouched and
    /// nothing is ever deleted. Returns the labels that were inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be taken, any insert fails, or
    /// the commit fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slotbook::config::default_inventory;
    /// use slotbook::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
    /// let added = db.sync_inventory(&default_inventory()).unwrap();
    /// println!("added {} resources", added.len());
    /// ```
    pub fn sync_inventory(&mut self, definitions: &[ResourceDefinition]) -> Result<Vec<String>> {
        let tx = self.begin_immediate()?;
        let mut added = Vec::new();
        for definition in definitions {
            if Self::insert_resource_if_absent(&tx, definition)? {
                added.push(definition.label.trim().to_string());
            }
        }
        tx.commit()?;

        if !added.is_empty() {
            log::info!("added {} resource(s): {}", added.len(), added.join(", "));
        }
        Ok(added)
    }
}
