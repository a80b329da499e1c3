//! Common test utilities for integration tests.
//!
//! Each helper opens its own database in a temporary directory seeded with
//! the stock inventory.

pub mod database;

use slotbook::config::{Config, ConfigBuilder};
use slotbook::{GroupDescriptor, PersonDescriptor};

/// A configuration built from defaults only.
#[allow(dead_code)]
pub fn default_config() -> Config {
    ConfigBuilder::new().skip_files().skip_env().build().unwrap()
}

/// A configuration with `overrides` layered over the defaults.
#[allow(dead_code)]
pub fn config_with(overrides: Config) -> Config {
    ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(overrides)
        .build()
        .unwrap()
}

/// An adult person descriptor.
#[allow(dead_code)]
pub fn adult(name: &str) -> PersonDescriptor {
    PersonDescriptor::new(name, 30, None)
}

/// A person descriptor with a specific age.
#[allow(dead_code)]
pub fn aged(name: &str, age: i64) -> PersonDescriptor {
    PersonDescriptor::new(name, age, None)
}

/// A team of adults named `<team>-<n>`.
#[allow(dead_code)]
pub fn adult_team(team: &str, size: usize) -> GroupDescriptor {
    GroupDescriptor {
        name: team.to_string(),
        members: (1..=size).map(|n| adult(&format!("{team}-{n}"))).collect(),
    }
}
