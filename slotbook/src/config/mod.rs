//! Configuration system for slotbook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SLOTBOOK_*`)
//! 3. Private project config (`slotbook.local.yaml`)
//! 4. Project config (`slotbook.yaml`)
//! 5. User config (`~/.slotbook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let hours = config.business_hours().unwrap();
//! println!("bookable from {} to {}", hours.start, hours.end);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    default_inventory, BookingConfig, BusinessHoursConfig, Config, OutputFormat, PageLimits,
    PaginationConfig, ResourceDefinition,
};
pub use validator::ConfigValidator;
