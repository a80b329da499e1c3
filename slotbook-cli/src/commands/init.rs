//! Init command implementation.
//!
//! Creates the data directory and database and seeds the configured
//! inventory. Safe to repeat.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_data_dir, GlobalOptions};
use clap::Parser;
use slotbook::database::DATABASE_FILE;
use slotbook::operations::{init_database, InitOptions};

/// Initialize the slotbook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize slotbook data directory and database")]
pub struct InitCommand {
    /// Delete the existing database and every booking in it
    #[arg(long)]
    overwrite: bool,

    /// Create a commented configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` has no effect here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        let config = load_configuration(global)?;
        let inventory = config.inventory();

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize slotbook in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE);
            match (db_path.exists(), self.overwrite) {
                (true, true) => {
                    println!("  - Remove existing database: {}", db_path.display());
                    println!("  - Create new database: {}", db_path.display());
                }
                (true, false) => {
                    println!("  - Keep existing database: {}", db_path.display());
                }
                (false, _) => println!("  - Create database: {}", db_path.display()),
            }
            println!("  - Ensure {} resources exist", inventory.len());

            if self.with_config {
                let config_path = data_dir.join("config.yaml");
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir, inventory)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized slotbook in: {}", result.data_dir.display());

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }

        if result.resources_added.is_empty() {
            println!("  - Inventory already up to date");
        } else {
            println!(
                "  - Added resources: {}",
                result.resources_added.join(", ")
            );
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
