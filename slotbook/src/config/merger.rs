//! Configuration merging and precedence handling.
//!
//! Nested sections merge field by field. The inventory list is replaced as
//! a whole so a project can define a completely different building.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, BusinessHoursConfig, Config, PaginationConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use slotbook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` over `target`.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.inventory.is_some() {
            target.inventory.clone_from(&source.inventory);
        }

        if let Some(ref hours) = source.business_hours {
            target.business_hours = Some(match target.business_hours.take() {
                Some(existing) => Self::merge_business_hours(existing, hours),
                None => hours.clone(),
            });
        }

        if let Some(ref pagination) = source.pagination {
            target.pagination = Some(match target.pagination.take() {
                Some(existing) => Self::merge_pagination(&existing, pagination),
                None => pagination.clone(),
            });
        }

        if let Some(ref booking) = source.booking {
            target.booking = Some(match target.booking.take() {
                Some(existing) => BookingConfig {
                    atomic_requester: booking.atomic_requester.or(existing.atomic_requester),
                },
                None => booking.clone(),
            });
        }
    }

    fn merge_business_hours(
        target: BusinessHoursConfig,
        source: &BusinessHoursConfig,
    ) -> BusinessHoursConfig {
        BusinessHoursConfig {
            start: source.start.clone().or(target.start),
            end: source.end.clone().or(target.end),
        }
    }

    fn merge_pagination(target: &PaginationConfig, source: &PaginationConfig) -> PaginationConfig {
        PaginationConfig {
            default_page_size: source.default_page_size.or(target.default_page_size),
            max_page_size: source.max_page_size.or(target.max_page_size),
        }
    }
}
