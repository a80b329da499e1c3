//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{
    BookingConfig, BusinessHoursConfig, Config, PaginationConfig, ResourceDefinition,
};
use super::validator::ConfigValidator;
use crate::resource::ResourceCategory;
use proptest::prelude::*;

fn time_strategy() -> impl Strategy<Value = String> {
    (0u32..24, prop::sample::select(vec![0u32, 15, 30, 45]))
        .prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of((prop::option::of(time_strategy()), prop::option::of(time_strategy()))),
        prop::option::of((prop::option::of(1u32..50), prop::option::of(1u32..200))),
        prop::option::of(prop::option::of(any::<bool>())),
        prop::option::of(1u64..60),
    )
        .prop_map(|(hours, pages, atomic, wait)| Config {
            business_hours: hours.map(|(start, end)| BusinessHoursConfig { start, end }),
            pagination: pages.map(|(default_page_size, max_page_size)| PaginationConfig {
                default_page_size,
                max_page_size,
            }),
            booking: atomic.map(|atomic_requester| BookingConfig { atomic_requester }),
            maximum_lock_wait_seconds: wait,
            ..Default::default()
        })
}

fn inventory_strategy() -> impl Strategy<Value = Vec<ResourceDefinition>> {
    prop::collection::vec((prop::sample::select(ResourceCategory::ALL.to_vec()), 1u32..10), 1..20)
        .prop_map(|defs| {
            defs.into_iter()
                .enumerate()
                .map(|(i, (category, cap))| {
                    let capacity = if category.is_exclusive() { 1 } else { cap };
                    ResourceDefinition::new(format!("R{i}"), category, capacity)
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // A value set in the higher layer always survives the merge
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        if high.maximum_lock_wait_seconds.is_some() {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, high.maximum_lock_wait_seconds);
        } else {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, low.maximum_lock_wait_seconds);
        }

        if let Some(start) = high.business_hours.as_ref().and_then(|h| h.start.clone()) {
            prop_assert_eq!(merged.business_hours.as_ref().and_then(|h| h.start.clone()), Some(start));
        }

        if let Some(max) = high.pagination.as_ref().and_then(|p| p.max_page_size) {
            prop_assert_eq!(merged.page_limits().max_page_size, max);
        }
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Well-formed inventories with unique labels always validate
    #[test]
    fn generated_inventories_validate(inventory in inventory_strategy()) {
        prop_assert!(ConfigValidator::validate_inventory(&inventory).is_ok());
    }

    // Validation accepts a window exactly when start precedes end
    #[test]
    fn business_hours_order_checked(start in time_strategy(), end in time_strategy()) {
        let config = Config {
            business_hours: Some(BusinessHoursConfig {
                start: Some(start.clone()),
                end: Some(end.clone()),
            }),
            ..Default::default()
        };
        prop_assert_eq!(ConfigValidator::validate(&config).is_ok(), start < end);
    }
}
