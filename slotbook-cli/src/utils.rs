//! Utility functions for CLI operations.
//!
//! Configuration loading, database opening, caller capability and the
//! shared list output formats live here.

use crate::error::CliError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use slotbook::config::OutputFormat;
use slotbook::database::DATABASE_FILE;
use slotbook::{Capability, Config, ConfigBuilder, Database, DatabaseConfig, Role};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Role of the caller, decided outside the engine.
    pub role: Role,
}

impl GlobalOptions {
    /// The capability granted to the caller's role.
    pub fn capability(&self) -> Capability {
        Capability::from_role(self.role)
    }
}

/// Resolve the data directory.
///
/// Priority: `--data-dir` (or `SLOTBOOK_DATA_DIR`), then `~/.slotbook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => slotbook::database::resolve_data_dir()
            .map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project files found from the working directory
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// A missing database is created and seeded with the configured inventory
/// unless auto-init is disabled.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);
    let created = !db_path.exists();

    if created && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => config.lock_wait(),
    };
    let mut db = Database::open(DatabaseConfig::new(&db_path).with_busy_timeout(timeout))?;

    if created {
        let added = db.sync_inventory(&config.inventory())?;
        log::info!(
            "created database at {} with {} resources",
            db_path.display(),
            added.len()
        );
    }

    Ok(db)
}

/// Parse a date-time argument such as `2030-01-07T10:30`.
pub fn parse_instant(field: &str, text: &str) -> Result<NaiveDateTime, CliError> {
    slotbook::slot::parse_instant(text)
        .map_err(|e| CliError::InvalidArguments(format!("--{field}: {}", e.message)))
}

/// The current UTC time without offset.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Pick the list output format: flag, then configuration, then table.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or(config.output_format).unwrap_or(OutputFormat::Table)
}

/// Rows of a list command, ready for any output format.
pub struct Listing<'a, T: Serialize> {
    /// Column names for table and delimited output.
    pub headers: &'a [&'a str],
    /// One string per column for each item.
    pub rows: Vec<Vec<String>>,
    /// The items themselves, for JSON output.
    pub items: &'a [T],
}

impl<T: Serialize> Listing<'_, T> {
    /// Write the listing to stdout in `format`.
    pub fn print(&self, format: OutputFormat) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match format {
            OutputFormat::Table => {
                let header_line = self
                    .headers
                    .iter()
                    .map(|s| s.to_uppercase())
                    .collect::<Vec<_>>()
                    .join("\t");
                writeln!(handle, "{header_line}")?;
                for row in &self.rows {
                    writeln!(handle, "{}", row.join("\t"))?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, self.items)?;
                writeln!(handle)?;
            }
            OutputFormat::Csv => self.write_delimited(handle, b',')?,
            OutputFormat::Tsv => self.write_delimited(handle, b'\t')?,
        }
        Ok(())
    }

    fn write_delimited(&self, handle: impl Write, delimiter: u8) -> Result<(), CliError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(handle);
        writer.write_record(self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        use std::time::UNIX_EPOCH;
        let st = UNIX_EPOCH + Duration::from_secs(1_705_314_645); // 2024-01-15 10:30:45 UTC
        assert_eq!(format_timestamp(st), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_parse_instant() {
        let at = parse_instant("at", "2030-01-07T10:30").unwrap();
        assert_eq!(at.format("%H:%M").to_string(), "10:30");
        assert!(matches!(
            parse_instant("at", "noon"),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_resolve_format_precedence() {
        let config = Config {
            output_format: Some(OutputFormat::Csv),
            ..Default::default()
        };
        assert_eq!(resolve_format(Some(OutputFormat::Json), &config), OutputFormat::Json);
        assert_eq!(resolve_format(None, &config), OutputFormat::Csv);
        assert_eq!(resolve_format(None, &Config::default()), OutputFormat::Table);
    }

    #[test]
    fn test_capability_from_role() {
        let mut global = GlobalOptions {
            quiet: false,
            data_dir: None,
            busy_timeout: None,
            disable_autoinit: false,
            role: Role::User,
        };
        assert_eq!(global.capability(), Capability::Standard);
        global.role = Role::Manager;
        assert_eq!(global.capability(), Capability::Privileged);
    }
}
