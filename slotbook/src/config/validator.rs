//! Configuration validation.
//!
//! Runs on the merged configuration before anything reads from it.

use crate::config::schema::{Config, ResourceDefinition};
use crate::error::{Error, Result};
use crate::resource::ResourceCategory;
use std::collections::HashSet;

/// Longest label accepted for a resource instance.
const MAX_LABEL_LEN: usize = 64;

/// Validates configuration values and their consistency.
///
/// # Examples
///
/// ```
/// use slotbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        let hours = config.business_hours()?;
        if hours.start >= hours.end {
            return Err(Error::Validation {
                field: "business_hours".into(),
                message: format!(
                    "start {} must be earlier than end {}",
                    hours.start.format("%H:%M"),
                    hours.end.format("%H:%M")
                ),
            });
        }

        let limits = config.page_limits();
        if limits.default_page_size == 0 || limits.max_page_size == 0 {
            return Err(Error::Validation {
                field: "pagination".into(),
                message: "page sizes must be greater than 0".into(),
            });
        }
        if limits.default_page_size > limits.max_page_size {
            return Err(Error::Validation {
                field: "pagination.default_page_size".into(),
                message: format!(
                    "default page size {} exceeds maximum {}",
                    limits.default_page_size, limits.max_page_size
                ),
            });
        }

        if let Some(ref inventory) = config.inventory {
            Self::validate_inventory(inventory)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Validate resource definitions.
    ///
    /// # Errors
    ///
    /// Fails on empty or duplicate labels, exclusive resources with a
    /// capacity other than 1, or shared resources with capacity 0.
    pub fn validate_inventory(inventory: &[ResourceDefinition]) -> Result<()> {
        let mut labels = HashSet::new();
        for (i, definition) in inventory.iter().enumerate() {
            let field = format!("inventory[{i}]");
            let label = definition.label.trim();
            if label.is_empty() || label.len() > MAX_LABEL_LEN || label.contains('\0') {
                return Err(Error::Validation {
                    field: format!("{field}.label"),
                    message: format!("label must be 1 to {MAX_LABEL_LEN} printable characters"),
                });
            }
            if !labels.insert(label.to_string()) {
                return Err(Error::Validation {
                    field: format!("{field}.label"),
                    message: format!("duplicate label '{label}'"),
                });
            }
            let capacity = definition.effective_capacity();
            match definition.category {
                ResourceCategory::Shared if capacity == 0 => {
                    return Err(Error::Validation {
                        field: format!("{field}.capacity"),
                        message: "shared capacity must be at least 1".into(),
                    });
                }
                ResourceCategory::Private | ResourceCategory::Conference if capacity != 1 => {
                    return Err(Error::Validation {
                        field: format!("{field}.capacity"),
                        message: format!(
                            "{} resources are exclusive and must have capacity 1",
                            definition.category
                        ),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{
        default_inventory, BusinessHoursConfig, PaginationConfig,
    };

    #[test]
    fn test_default_config_valid() {
        ConfigValidator::validate(&Config::default()).unwrap();
        ConfigValidator::validate_inventory(&default_inventory()).unwrap();
    }

    #[test]
    fn test_inverted_business_hours() {
        let config = Config {
            business_hours: Some(BusinessHoursConfig {
                start: Some("18:00".into()),
                end: Some("09:00".into()),
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_page_size_rules() {
        let zero = Config {
            pagination: Some(PaginationConfig {
                default_page_size: Some(0),
                max_page_size: None,
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&zero).is_err());

        let inverted = Config {
            pagination: Some(PaginationConfig {
                default_page_size: Some(50),
                max_page_size: Some(20),
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&inverted).is_err());
    }

    #[test]
    fn test_duplicate_labels() {
        let inventory = vec![
            ResourceDefinition::new("A", ResourceCategory::Private, 1),
            ResourceDefinition::new(" A ", ResourceCategory::Shared, 3),
        ];
        let err = ConfigValidator::validate_inventory(&inventory).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_exclusive_capacity_must_be_one() {
        let inventory = vec![ResourceDefinition::new("C1", ResourceCategory::Conference, 20)];
        assert!(ConfigValidator::validate_inventory(&inventory).is_err());
    }

    #[test]
    fn test_shared_capacity_positive() {
        let inventory = vec![ResourceDefinition::new("S1", ResourceCategory::Shared, 0)];
        assert!(ConfigValidator::validate_inventory(&inventory).is_err());
    }

    #[test]
    fn test_empty_label() {
        let inventory = vec![ResourceDefinition::new("  ", ResourceCategory::Private, 1)];
        assert!(ConfigValidator::validate_inventory(&inventory).is_err());
    }

    #[test]
    fn test_zero_lock_wait() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
