//! Configuration schema definitions.
//!
//! Every field is optional so partial files can be layered. The accessor
//! methods on [`Config`] fill in defaults for whatever no layer supplied.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::ResourceCategory;
use crate::slot::{parse_time_of_day, BusinessHours};

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default upper bound on the page size a caller may request.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Default lock wait when no configuration sets one.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Capacity given to shared resources that do not state one.
pub const DEFAULT_SHARED_CAPACITY: u32 = 4;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use slotbook::config::{BookingConfig, Config};
///
/// let config = Config {
///     booking: Some(BookingConfig { atomic_requester: Some(true) }),
///     ..Default::default()
/// };
/// assert!(config.atomic_requester());
/// assert_eq!(config.inventory().len(), 15);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Window in which availability queries are accepted.
    pub business_hours: Option<BusinessHoursConfig>,

    /// Resource instances to create on initialization.
    pub inventory: Option<Vec<ResourceDefinition>>,

    /// Listing page sizes.
    pub pagination: Option<PaginationConfig>,

    /// Booking behaviour switches.
    pub booking: Option<BookingConfig>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The configured business hours, or 09:00–18:00.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured time is malformed.
    pub fn business_hours(&self) -> Result<BusinessHours> {
        let mut hours = BusinessHours::default();
        if let Some(ref configured) = self.business_hours {
            if let Some(ref start) = configured.start {
                hours.start = parse_time_of_day("business_hours.start", start)?;
            }
            if let Some(ref end) = configured.end {
                hours.end = parse_time_of_day("business_hours.end", end)?;
            }
        }
        Ok(hours)
    }

    /// The configured inventory, or the default seed.
    #[must_use]
    pub fn inventory(&self) -> Vec<ResourceDefinition> {
        self.inventory.clone().unwrap_or_else(default_inventory)
    }

    /// Default and maximum page sizes.
    #[must_use]
    pub fn page_limits(&self) -> PageLimits {
        let pagination = self.pagination.clone().unwrap_or_default();
        PageLimits {
            default_page_size: pagination.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_page_size: pagination.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE),
        }
    }

    /// Whether requester resolution joins the booking transaction.
    #[must_use]
    pub fn atomic_requester(&self) -> bool {
        self.booking
            .as_ref()
            .and_then(|b| b.atomic_requester)
            .unwrap_or(false)
    }

    /// Lock wait as a duration.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }
}

/// Business hours as written in YAML (`"HH:MM"` strings).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BusinessHoursConfig {
    /// Earliest bookable slot start.
    pub start: Option<String>,
    /// Latest bookable slot start.
    pub end: Option<String>,
}

/// A resource instance to seed.
///
/// # Examples
///
/// ```
/// use slotbook::config::ResourceDefinition;
/// use slotbook::ResourceCategory;
///
/// let desk: ResourceDefinition = serde_yaml::from_str("label: S9\ncategory: SHARED").unwrap();
/// assert_eq!(desk.category, ResourceCategory::Shared);
/// assert_eq!(desk.effective_capacity(), 4);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResourceDefinition {
    /// Unique label.
    pub label: String,
    /// Category.
    pub category: ResourceCategory,
    /// Capacity; exclusive categories always use 1.
    pub capacity: Option<u32>,
}

impl ResourceDefinition {
    /// Creates a definition with an explicit capacity.
    #[must_use]
    pub fn new(label: impl Into<String>, category: ResourceCategory, capacity: u32) -> Self {
        Self {
            label: label.into(),
            category,
            capacity: Some(capacity),
        }
    }

    /// Capacity after defaults are applied.
    #[must_use]
    pub fn effective_capacity(&self) -> u32 {
        match (self.category, self.capacity) {
            (ResourceCategory::Shared, Some(n)) => n,
            (ResourceCategory::Shared, None) => DEFAULT_SHARED_CAPACITY,
            (_, Some(n)) => n,
            (_, None) => 1,
        }
    }
}

/// The stock inventory: eight private rooms, four conference rooms and
/// three shared desk areas.
#[must_use]
pub fn default_inventory() -> Vec<ResourceDefinition> {
    let private = (1..=8).map(|i| ResourceDefinition::new(format!("P{i}"), ResourceCategory::Private, 1));
    let conference =
        (1..=4).map(|i| ResourceDefinition::new(format!("C{i}"), ResourceCategory::Conference, 1));
    let shared = (1..=3).map(|i| {
        ResourceDefinition::new(
            format!("S{i}"),
            ResourceCategory::Shared,
            DEFAULT_SHARED_CAPACITY,
        )
    });
    private.chain(conference).chain(shared).collect()
}

/// Listing page sizes as written in YAML.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size used when the caller does not ask for one.
    pub default_page_size: Option<u32>,
    /// Largest page size a caller may ask for.
    pub max_page_size: Option<u32>,
}

/// Resolved page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size used when the caller does not ask for one.
    pub default_page_size: u32,
    /// Largest page size a caller may ask for.
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

/// Booking behaviour switches.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Resolve persons and groups inside the booking transaction, so a
    /// rejected booking leaves no new rows behind.
    pub atomic_requester: Option<bool>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use slotbook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
