// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for individual applicability rules.

use crate::{Applicability, DiscountEvaluator, Ineligibility};
use innkeep_domain::{
    BookingContext, BookingContextInput, Discount, DomainError, Location, LocationScope,
    Restrictions, RoomCategory, RoomId, UsageLimit, ValidityType,
};
use rust_decimal::Decimal;
use time::macros::{date, datetime};

use super::helpers::{
    create_context, create_context_at, create_test_context, create_test_evaluator,
    create_test_input,
};

fn create_test_discount() -> Discount {
    Discount::percentage("Test", Decimal::from(10))
}

fn reason(discount: &Discount, context: &BookingContext) -> Option<Ineligibility> {
    create_test_evaluator()
        .check_applicability(discount, context)
        .unwrap()
        .ineligibility()
}

#[test]
fn test_plain_discount_applies() {
    let result: Result<Applicability, DomainError> =
        create_test_evaluator().check_applicability(&create_test_discount(), &create_test_context());

    assert_eq!(result, Ok(Applicability::Applicable));
}

#[test]
fn test_inactive_discount_never_applies() {
    let discount: Discount = create_test_discount().deactivated();
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::Inactive)
    );
}

#[test]
fn test_inactive_misconfigured_discount_is_not_an_error() {
    let mut discount: Discount = create_test_discount().deactivated();
    discount.discount_value = None;
    discount.validity_type = ValidityType::DateRange;

    let result = create_test_evaluator().is_applicable(&discount, &create_test_context());

    assert_eq!(result, Ok(false));
}

#[test]
fn test_missing_value_is_a_configuration_error() {
    let mut discount: Discount = create_test_discount();
    discount.discount_value = None;

    let result = create_test_evaluator().is_applicable(&discount, &create_test_context());

    assert!(matches!(
        result,
        Err(DomainError::DiscountConfiguration { .. })
    ));
}

#[test]
fn test_date_range_without_dates_is_a_configuration_error() {
    let mut discount: Discount = create_test_discount();
    discount.validity_type = ValidityType::DateRange;
    discount.valid_from = Some(date!(2024 - 01 - 01));

    let result = create_test_evaluator().is_applicable(&discount, &create_test_context());

    assert!(matches!(
        result,
        Err(DomainError::DiscountConfiguration { .. })
    ));
}

#[test]
fn test_last_minute_without_window_is_a_configuration_error() {
    let mut discount: Discount = create_test_discount();
    discount.validity_type = ValidityType::LastMinute;

    let result = create_test_evaluator().is_applicable(&discount, &create_test_context());

    assert!(matches!(
        result,
        Err(DomainError::DiscountConfiguration { .. })
    ));
}

#[test]
fn test_location_scope() {
    let context: BookingContext = create_test_context(); // airport

    let rothschild: Discount = create_test_discount().with_location(LocationScope::Rothschild);
    assert_eq!(
        reason(&rothschild, &context),
        Some(Ineligibility::LocationMismatch)
    );

    let airport: Discount = create_test_discount().with_location(LocationScope::Airport);
    assert_eq!(reason(&airport, &context), None);

    let both: Discount = create_test_discount().with_location(LocationScope::Both);
    assert_eq!(reason(&both, &context), None);
}

#[test]
fn test_room_list_must_contain_room() {
    let discount: Discount =
        create_test_discount().for_rooms([RoomId::new("201"), RoomId::new("202")]);
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::RoomNotCovered)
    );

    let discount: Discount =
        create_test_discount().for_rooms([RoomId::new("101"), RoomId::new("202")]);
    assert_eq!(reason(&discount, &create_test_context()), None);
}

#[test]
fn test_room_list_takes_precedence_over_categories() {
    // Room listed, category not: the room list decides
    let discount: Discount = create_test_discount()
        .for_rooms([RoomId::new("101")])
        .for_categories([RoomCategory::new("dorm")]);
    assert_eq!(reason(&discount, &create_test_context()), None);
}

#[test]
fn test_category_list_must_contain_category() {
    let discount: Discount = create_test_discount().for_categories([RoomCategory::new("dorm")]);
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::CategoryNotCovered)
    );

    let discount: Discount = create_test_discount()
        .for_categories([RoomCategory::new("dorm"), RoomCategory::new("deluxe")]);
    assert_eq!(reason(&discount, &create_test_context()), None);
}

#[test]
fn test_date_range_bounds_are_inclusive() {
    let discount: Discount =
        create_test_discount().valid_between(date!(2024 - 03 - 01), date!(2024 - 03 - 31));
    assert_eq!(reason(&discount, &create_test_context()), None);

    let last_day: BookingContext =
        create_context_at(create_test_input(), datetime!(2024-03-31 12:00 UTC));
    assert_eq!(reason(&discount, &last_day), None);
}

#[test]
fn test_date_range_not_yet_started() {
    let discount: Discount =
        create_test_discount().valid_between(date!(2024 - 03 - 02), date!(2024 - 03 - 31));
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::NotYetValid)
    );
}

#[test]
fn test_date_range_uses_property_local_date() {
    // 22:30 UTC on Feb 29 is already March 1 in Israel
    let discount: Discount =
        create_test_discount().valid_between(date!(2024 - 03 - 01), date!(2024 - 03 - 31));
    let late_evening: BookingContext =
        create_context_at(create_test_input(), datetime!(2024-02-29 22:30 UTC));

    assert_eq!(reason(&discount, &late_evening), None);

    let utc_evaluator: DiscountEvaluator = DiscountEvaluator::from_timezone_name("UTC").unwrap();
    assert_eq!(
        utc_evaluator
            .check_applicability(&discount, &late_evening)
            .unwrap(),
        Applicability::NotApplicable(Ineligibility::NotYetValid)
    );
}

#[test]
fn test_last_minute_window() {
    // Arrival on March 10, evaluated March 1: nine days out
    let discount: Discount = create_test_discount().last_minute(9, false);
    assert_eq!(reason(&discount, &create_test_context()), None);

    let discount: Discount = create_test_discount().last_minute(8, true);
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::TooFarFromArrival)
    );
}

#[test]
fn test_last_minute_next_day_arrival_unaffected_by_arrival_day_flag() {
    let tomorrow: BookingContext = create_context(BookingContextInput {
        check_in: Some(date!(2024 - 03 - 02)),
        check_out: Some(date!(2024 - 03 - 04)),
        ..create_test_input()
    });
    let discount: Discount = create_test_discount().last_minute(1, false);

    assert_eq!(reason(&discount, &tomorrow), None);
}

#[test]
fn test_minimum_and_maximum_nights() {
    // Test context has three nights
    let discount: Discount = create_test_discount().with_restrictions(Restrictions {
        min_nights: 3,
        max_nights: Some(3),
        ..Restrictions::default()
    });
    assert_eq!(reason(&discount, &create_test_context()), None);

    let discount: Discount = create_test_discount().with_restrictions(Restrictions {
        max_nights: Some(2),
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::TooManyNights)
    );
}

#[test]
fn test_minimum_and_maximum_guests() {
    // Test context has two guests
    let discount: Discount = create_test_discount().with_restrictions(Restrictions {
        min_guests: 3,
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::TooFewGuests)
    );

    let discount: Discount = create_test_discount().with_restrictions(Restrictions {
        max_guests: Some(1),
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::TooManyGuests)
    );

    let discount: Discount = create_test_discount().with_restrictions(Restrictions {
        min_guests: 2,
        max_guests: Some(2),
        ..Restrictions::default()
    });
    assert_eq!(reason(&discount, &create_test_context()), None);
}

#[test]
fn test_valid_days_of_week_checks_check_in_day() {
    // Test context checks in on a Sunday (0)
    let weekend: Discount = create_test_discount().with_restrictions(Restrictions {
        valid_days_of_week: [5, 6].into_iter().collect(),
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&weekend, &create_test_context()),
        Some(Ineligibility::CheckInDayExcluded)
    );

    let sunday: Discount = create_test_discount().with_restrictions(Restrictions {
        valid_days_of_week: [0].into_iter().collect(),
        ..Restrictions::default()
    });
    assert_eq!(reason(&sunday, &create_test_context()), None);
}

#[test]
fn test_tourist_and_resident_flags() {
    let residents_only: Discount = create_test_discount().with_restrictions(Restrictions {
        applicable_for_tourists: false,
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&residents_only, &create_test_context()),
        Some(Ineligibility::NotForTourists)
    );

    let resident: BookingContext = create_context(BookingContextInput {
        is_tourist: Some(false),
        ..create_test_input()
    });
    assert_eq!(reason(&residents_only, &resident), None);

    let tourists_only: Discount = create_test_discount().with_restrictions(Restrictions {
        applicable_for_israelis: false,
        ..Restrictions::default()
    });
    assert_eq!(
        reason(&tourists_only, &resident),
        Some(Ineligibility::NotForIsraelis)
    );
}

#[test]
fn test_usage_limit_below_cap_applies() {
    let discount: Discount = create_test_discount().with_usage_limit(UsageLimit::capped(5, 4));
    assert_eq!(reason(&discount, &create_test_context()), None);
}

#[test]
fn test_first_failing_rule_is_reported() {
    // Wrong branch and wrong room: the branch is checked first
    let discount: Discount = create_test_discount()
        .with_location(LocationScope::Rothschild)
        .for_rooms([RoomId::new("999")]);
    assert_eq!(
        reason(&discount, &create_test_context()),
        Some(Ineligibility::LocationMismatch)
    );
}

#[test]
fn test_rothschild_booking() {
    let context: BookingContext = create_context(BookingContextInput {
        location: Some(Location::Rothschild),
        ..create_test_input()
    });
    let discount: Discount = create_test_discount().with_location(LocationScope::Rothschild);
    assert_eq!(reason(&discount, &context), None);
}
