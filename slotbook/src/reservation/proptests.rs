//! Property-based tests for `Slot` and `Reservation`.

use super::{Requester, Reservation, ReservationStatus};
use crate::slot::{BusinessHours, Slot, SLOT_MINUTES};
use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;

// Whole-hour slots across a few years
fn slot_strategy() -> impl Strategy<Value = Slot> {
    (2025i32..2035, 1u32..=12, 1u32..=28, 0u32..24).prop_map(|(y, mo, d, h)| {
        Slot::new(
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    })
}

fn requester_strategy() -> impl Strategy<Value = Requester> {
    (any::<bool>(), 1i64..1000, "[a-z]{1,12}").prop_map(|(team, id, name)| {
        if team {
            Requester::Group { id, name }
        } else {
            Requester::Person { id, name }
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn end_is_always_one_slot_after_start(slot in slot_strategy()) {
        prop_assert_eq!(slot.end().start() - slot.start(), TimeDelta::minutes(SLOT_MINUTES));
    }

    #[test]
    fn display_parse_round_trip(slot in slot_strategy()) {
        let parsed: Slot = slot.to_string().parse().unwrap();
        prop_assert_eq!(parsed, slot);
    }

    #[test]
    fn unix_secs_round_trip(slot in slot_strategy()) {
        prop_assert_eq!(Slot::from_unix_secs(slot.unix_secs()).unwrap(), slot);
    }

    #[test]
    fn slot_covers_its_own_bounds(slot in slot_strategy()) {
        prop_assert!(slot.covers(slot.start()));
        prop_assert!(slot.covers(slot.end().start()));
        prop_assert!(!slot.covers(slot.end().start() + TimeDelta::seconds(1)));
    }

    #[test]
    fn business_hours_match_time_of_day(slot in slot_strategy()) {
        let hours = BusinessHours::default();
        let t = slot.time_of_day();
        let expected = t >= hours.start && t <= hours.end;
        prop_assert_eq!(hours.contains(&slot), expected);
    }

    #[test]
    fn reservation_kind_matches_requester(
        slot in slot_strategy(),
        requester in requester_strategy(),
        resource_id in 1i64..100,
    ) {
        let expected = requester.kind();
        let reservation = Reservation::builder(resource_id, requester, slot).build().unwrap();
        prop_assert_eq!(reservation.requester_kind(), expected);
        prop_assert_eq!(reservation.status(), ReservationStatus::Active);
        prop_assert_eq!(reservation.end(), slot.end());
    }
}
