//! Environment variable handling for configuration overrides.
//!
//! `SLOTBOOK_*` variables override values from configuration files.

use crate::config::schema::{BookingConfig, BusinessHoursConfig, Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong type.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_business_hours(config);
        Self::apply_pagination(config)?;

        if let Some(value) = Self::read("SLOTBOOK_ATOMIC_REQUESTER") {
            let flag = Self::parse_bool("SLOTBOOK_ATOMIC_REQUESTER", &value)?;
            config
                .booking
                .get_or_insert_with(BookingConfig::default)
                .atomic_requester = Some(flag);
        }

        if let Some(value) = Self::read("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &value)?);
        }

        if let Some(value) = Self::read("SLOTBOOK_OUTPUT_FORMAT") {
            config.output_format =
                Some(
                    OutputFormat::from_str(&value).map_err(|message| Error::Validation {
                        field: "SLOTBOOK_OUTPUT_FORMAT".into(),
                        message,
                    })?,
                );
        }

        Ok(())
    }

    fn apply_business_hours(config: &mut Config) {
        let start = Self::read("SLOTBOOK_BUSINESS_HOURS_START");
        let end = Self::read("SLOTBOOK_BUSINESS_HOURS_END");
        if start.is_none() && end.is_none() {
            return;
        }
        let hours = config
            .business_hours
            .get_or_insert_with(BusinessHoursConfig::default);
        if start.is_some() {
            hours.start = start;
        }
        if end.is_some() {
            hours.end = end;
        }
    }

    fn apply_pagination(config: &mut Config) -> Result<()> {
        let default_size = Self::read("SLOTBOOK_DEFAULT_PAGE_SIZE")
            .map(|v| Self::parse_number::<u32>("SLOTBOOK_DEFAULT_PAGE_SIZE", &v))
            .transpose()?;
        let max_size = Self::read("SLOTBOOK_MAX_PAGE_SIZE")
            .map(|v| Self::parse_number::<u32>("SLOTBOOK_MAX_PAGE_SIZE", &v))
            .transpose()?;
        if default_size.is_none() && max_size.is_none() {
            return Ok(());
        }
        let pagination = config.pagination.get_or_insert_with(Default::default);
        if default_size.is_some() {
            pagination.default_page_size = default_size;
        }
        if max_size.is_some() {
            pagination.max_page_size = max_size;
        }
        Ok(())
    }

    fn read(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("'{s}' is not a non-negative integer"),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "SLOTBOOK_BUSINESS_HOURS_START",
        "SLOTBOOK_BUSINESS_HOURS_END",
        "SLOTBOOK_DEFAULT_PAGE_SIZE",
        "SLOTBOOK_MAX_PAGE_SIZE",
        "SLOTBOOK_ATOMIC_REQUESTER",
        "SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
        "SLOTBOOK_OUTPUT_FORMAT",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        for v in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("t", v).unwrap());
        }
        for v in ["false", "0", "NO", "off"] {
            assert!(!EnvironmentConfig::parse_bool("t", v).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("t", "maybe").is_err());
    }

    #[test]
    #[serial]
    fn test_no_variables_leaves_config_untouched() {
        clear();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_overrides_applied() {
        clear();
        env::set_var("SLOTBOOK_BUSINESS_HOURS_START", "08:00");
        env::set_var("SLOTBOOK_MAX_PAGE_SIZE", "25");
        env::set_var("SLOTBOOK_ATOMIC_REQUESTER", "yes");
        env::set_var("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "12");
        env::set_var("SLOTBOOK_OUTPUT_FORMAT", "tsv");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear();

        let hours = config.business_hours.as_ref().unwrap();
        assert_eq!(hours.start.as_deref(), Some("08:00"));
        assert_eq!(hours.end, None);
        assert_eq!(config.page_limits().max_page_size, 25);
        assert_eq!(config.page_limits().default_page_size, 10);
        assert!(config.atomic_requester());
        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
        assert_eq!(config.output_format, Some(OutputFormat::Tsv));
    }

    #[test]
    #[serial]
    fn test_invalid_number_rejected() {
        clear();
        env::set_var("SLOTBOOK_DEFAULT_PAGE_SIZE", "ten");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_format_rejected() {
        clear();
        env::set_var("SLOTBOOK_OUTPUT_FORMAT", "xml");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        assert!(result.is_err());
    }
}
