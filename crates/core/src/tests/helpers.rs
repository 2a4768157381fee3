// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DiscountEvaluator;
use innkeep_domain::{BookingContext, BookingContextInput, Location, RoomCategory, RoomId};
use time::OffsetDateTime;
use time::macros::{date, datetime};

/// Friday 2024-03-01, midday in Israel.
pub const NOW: OffsetDateTime = datetime!(2024-03-01 10:00 UTC);

pub fn create_test_evaluator() -> DiscountEvaluator {
    DiscountEvaluator::default()
}

/// Sunday 2024-03-10 to Wednesday 2024-03-13, room 101 (deluxe) at the
/// airport branch, two tourists.
pub fn create_test_input() -> BookingContextInput {
    BookingContextInput {
        check_in: Some(date!(2024 - 03 - 10)),
        check_out: Some(date!(2024 - 03 - 13)),
        nights: None,
        room_id: Some(RoomId::new("101")),
        room_category: Some(RoomCategory::new("deluxe")),
        location: Some(Location::Airport),
        guest_count: Some(2),
        is_tourist: Some(true),
    }
}

pub fn create_test_context() -> BookingContext {
    create_test_input().into_context(NOW).unwrap()
}

pub fn create_context(input: BookingContextInput) -> BookingContext {
    input.into_context(NOW).unwrap()
}

pub fn create_context_at(input: BookingContextInput, now: OffsetDateTime) -> BookingContext {
    input.into_context(now).unwrap()
}
