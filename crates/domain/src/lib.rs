// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain records for the innkeep back-office.
//!
//! This crate holds the discount and booking records, their creation-time
//! validation, and the stay reconciliation used by the booking form.
//! Everything here is pure and deterministic.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod dates;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{BookingContext, BookingContextInput, Stay};
pub use dates::{parse_date, weekday_number};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Discount, DiscountType, LastMinuteWindow, Location, LocationScope, Restrictions, RoomCategory,
    RoomId, UsageLimit, ValidityType,
};
pub use validation::{MAX_PRIORITY, validate_catalogue, validate_discount};
