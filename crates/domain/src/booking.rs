// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking stays and the booking context used for discount evaluation.
//!
//! ## Invariants
//!
//! - A stay always has at least one night (`check_out > check_in`)
//! - A booking context always has at least one guest
//! - Nothing in a booking context is defaulted: a missing fact is an error
//!
//! ## Reconciliation
//!
//! The booking form lets staff edit the arrival date, the departure date
//! or the number of nights. `Stay` offers one operation per edit:
//!
//! - moving the arrival keeps the number of nights
//! - moving the departure keeps the arrival and recomputes nights
//! - changing nights keeps the arrival and recomputes the departure

use crate::dates::{iso_date, weekday_number};
use crate::error::DomainError;
use crate::types::{Location, RoomCategory, RoomId};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

/// A check-in/check-out pair spanning at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    #[serde(with = "iso_date")]
    check_in: Date,
    #[serde(with = "iso_date")]
    check_out: Date,
}

impl Stay {
    /// Creates a stay from arrival and departure dates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingContext` if `check_out` is not
    /// after `check_in`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidBookingContext {
                reason: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Creates a stay from an arrival date and a number of nights.
    ///
    /// # Errors
    ///
    /// Returns an error if `nights` is zero or the departure date overflows.
    pub fn from_nights(check_in: Date, nights: u32) -> Result<Self, DomainError> {
        if nights == 0 {
            return Err(DomainError::InvalidBookingContext {
                reason: String::from("a stay must be at least one night"),
            });
        }
        let check_out: Date = check_in
            .checked_add(Duration::days(i64::from(nights)))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {nights} nights to {check_in}"),
            })?;
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the departure date.
    #[must_use]
    pub const fn check_out(&self) -> Date {
        self.check_out
    }

    /// Returns the number of nights (never less than 1).
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days: i64 = (self.check_out - self.check_in).whole_days();
        u32::try_from(days).unwrap_or(u32::MAX).max(1)
    }

    /// Returns the check-in weekday numbered from Sunday (0).
    #[must_use]
    pub const fn check_in_weekday(&self) -> u8 {
        weekday_number(self.check_in)
    }

    /// Moves the arrival date, keeping the number of nights.
    ///
    /// # Errors
    ///
    /// Returns an error if the shifted departure date overflows.
    pub fn with_check_in(&self, check_in: Date) -> Result<Self, DomainError> {
        Self::from_nights(check_in, self.nights())
    }

    /// Moves the departure date, keeping the arrival.
    ///
    /// # Errors
    ///
    /// Returns an error if `check_out` is not after the arrival.
    pub fn with_check_out(&self, check_out: Date) -> Result<Self, DomainError> {
        Self::new(self.check_in, check_out)
    }

    /// Changes the number of nights, keeping the arrival.
    ///
    /// # Errors
    ///
    /// Returns an error if `nights` is zero or the departure date overflows.
    pub fn with_nights(&self, nights: u32) -> Result<Self, DomainError> {
        Self::from_nights(self.check_in, nights)
    }
}

/// The facts about a prospective booking needed to evaluate discounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingContext {
    stay: Stay,
    room_id: RoomId,
    room_category: RoomCategory,
    location: Location,
    guest_count: u32,
    is_tourist: bool,
    now: OffsetDateTime,
}

impl BookingContext {
    /// Creates a new `BookingContext`.
    ///
    /// # Arguments
    ///
    /// * `stay` - The booked stay
    /// * `room_id` - The booked room
    /// * `room_category` - The booked room's category
    /// * `location` - The branch the room belongs to
    /// * `guest_count` - Number of guests
    /// * `is_tourist` - Whether the guest is a foreign tourist
    /// * `now` - The evaluation timestamp
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingContext` if the room id is empty
    /// or the guest count is zero.
    pub fn new(
        stay: Stay,
        room_id: RoomId,
        room_category: RoomCategory,
        location: Location,
        guest_count: u32,
        is_tourist: bool,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if room_id.value().is_empty() {
            return Err(DomainError::InvalidBookingContext {
                reason: String::from("room id cannot be empty"),
            });
        }
        if guest_count == 0 {
            return Err(DomainError::InvalidBookingContext {
                reason: String::from("a booking must have at least one guest"),
            });
        }
        Ok(Self {
            stay,
            room_id,
            room_category,
            location,
            guest_count,
            is_tourist,
            now,
        })
    }

    /// Returns the booked stay.
    #[must_use]
    pub const fn stay(&self) -> &Stay {
        &self.stay
    }

    /// Returns the number of nights.
    #[must_use]
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns the booked room's category.
    #[must_use]
    pub const fn room_category(&self) -> &RoomCategory {
        &self.room_category
    }

    /// Returns the branch.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn guest_count(&self) -> u32 {
        self.guest_count
    }

    /// Returns whether the guest is a foreign tourist.
    #[must_use]
    pub const fn is_tourist(&self) -> bool {
        self.is_tourist
    }

    /// Returns the evaluation timestamp.
    #[must_use]
    pub const fn now(&self) -> OffsetDateTime {
        self.now
    }
}

/// A booking request as received from the booking workflow.
///
/// Every field is optional on the wire; `into_context` turns it into a
/// `BookingContext` or reports what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingContextInput {
    /// Arrival date.
    #[serde(default, with = "iso_date::option")]
    pub check_in: Option<Date>,
    /// Departure date.
    #[serde(default, with = "iso_date::option")]
    pub check_out: Option<Date>,
    /// Number of nights, as an alternative to `check_out`.
    #[serde(default)]
    pub nights: Option<u32>,
    /// Booked room.
    #[serde(default)]
    pub room_id: Option<RoomId>,
    /// Booked room's category.
    #[serde(default)]
    pub room_category: Option<RoomCategory>,
    /// Branch.
    #[serde(default)]
    pub location: Option<Location>,
    /// Number of guests.
    #[serde(default)]
    pub guest_count: Option<u32>,
    /// Whether the guest is a foreign tourist.
    #[serde(default)]
    pub is_tourist: Option<bool>,
}

impl BookingContextInput {
    /// Converts the request into a `BookingContext` evaluated at `now`.
    ///
    /// When both `check_out` and `nights` are given they must agree.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingContext` if a field is missing or
    /// the dates are inconsistent.
    pub fn into_context(self, now: OffsetDateTime) -> Result<BookingContext, DomainError> {
        let check_in: Date = self.check_in.ok_or_else(|| missing("check-in date"))?;

        let stay: Stay = match (self.check_out, self.nights) {
            (Some(check_out), nights) => {
                let stay: Stay = Stay::new(check_in, check_out)?;
                if let Some(nights) = nights
                    && nights != stay.nights()
                {
                    return Err(DomainError::InvalidBookingContext {
                        reason: format!(
                            "{nights} nights does not match {check_in} to {check_out}"
                        ),
                    });
                }
                stay
            }
            (None, Some(nights)) => Stay::from_nights(check_in, nights)?,
            (None, None) => return Err(missing("check-out date")),
        };

        BookingContext::new(
            stay,
            self.room_id.ok_or_else(|| missing("room id"))?,
            self.room_category.ok_or_else(|| missing("room category"))?,
            self.location.ok_or_else(|| missing("location"))?,
            self.guest_count.ok_or_else(|| missing("guest count"))?,
            self.is_tourist.ok_or_else(|| missing("guest nationality"))?,
            now,
        )
    }
}

fn missing(what: &str) -> DomainError {
    DomainError::InvalidBookingContext {
        reason: format!("missing {what}"),
    }
}
