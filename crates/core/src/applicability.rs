// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Discount applicability rules.
//!
//! A discount applies to a booking only if every rule holds:
//!
//! 1. The discount is active
//! 2. The booking's branch is within the discount's location scope
//! 3. The room (or, failing a room list, the category) is covered
//! 4. The validity window admits the booking
//! 5. Night, guest, weekday and nationality restrictions hold
//! 6. The usage cap has not been reached
//!
//! Rules are checked in that order and the first failure is reported.
//! The order never changes whether a discount applies, only which reason
//! is reported.

use crate::pricing::required_value;
use innkeep_domain::{
    BookingContext, Discount, DomainError, LastMinuteWindow, Restrictions, Stay, UsageLimit,
    ValidityType,
};
use serde::Serialize;
use time::Date;

/// Why a discount does not apply to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligibility {
    /// The discount is switched off.
    Inactive,
    /// The discount is not offered at the booking's branch.
    LocationMismatch,
    /// The discount is limited to other rooms.
    RoomNotCovered,
    /// The discount is limited to other room categories.
    CategoryNotCovered,
    /// The date range has not started yet.
    NotYetValid,
    /// The date range has ended.
    Expired,
    /// Arrival is further away than the last-minute window.
    TooFarFromArrival,
    /// Same-day arrivals are excluded from the last-minute window.
    ArrivalDayExcluded,
    /// The stay is shorter than the minimum.
    TooFewNights,
    /// The stay is longer than the maximum.
    TooManyNights,
    /// Fewer guests than the minimum.
    TooFewGuests,
    /// More guests than the maximum.
    TooManyGuests,
    /// The check-in weekday is not one of the valid days.
    CheckInDayExcluded,
    /// The discount is not offered to tourists.
    NotForTourists,
    /// The discount is not offered to Israeli residents.
    NotForIsraelis,
    /// The usage cap has been reached.
    UsageLimitReached,
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason: &str = match self {
            Self::Inactive => "discount is inactive",
            Self::LocationMismatch => "not offered at this branch",
            Self::RoomNotCovered => "not offered for this room",
            Self::CategoryNotCovered => "not offered for this room category",
            Self::NotYetValid => "validity period has not started",
            Self::Expired => "validity period has ended",
            Self::TooFarFromArrival => "arrival is outside the last-minute window",
            Self::ArrivalDayExcluded => "same-day arrivals are excluded",
            Self::TooFewNights => "stay is shorter than the minimum",
            Self::TooManyNights => "stay is longer than the maximum",
            Self::TooFewGuests => "fewer guests than the minimum",
            Self::TooManyGuests => "more guests than the maximum",
            Self::CheckInDayExcluded => "check-in weekday is excluded",
            Self::NotForTourists => "not offered to tourists",
            Self::NotForIsraelis => "not offered to Israeli residents",
            Self::UsageLimitReached => "usage limit reached",
        };
        write!(f, "{reason}")
    }
}

/// The outcome of checking one discount against one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applicability {
    /// Every rule holds.
    Applicable,
    /// The first rule that failed.
    NotApplicable(Ineligibility),
}

impl Applicability {
    /// Returns whether the discount applies.
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        matches!(self, Self::Applicable)
    }

    /// Returns the reason the discount does not apply, if any.
    #[must_use]
    pub const fn ineligibility(&self) -> Option<Ineligibility> {
        match self {
            Self::Applicable => None,
            Self::NotApplicable(reason) => Some(*reason),
        }
    }
}

impl From<Result<(), Ineligibility>> for Applicability {
    fn from(outcome: Result<(), Ineligibility>) -> Self {
        match outcome {
            Ok(()) => Self::Applicable,
            Err(reason) => Self::NotApplicable(reason),
        }
    }
}

/// A discount's validity rule with its parameters resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidityRule {
    Unlimited,
    DateRange { valid_from: Date, valid_until: Date },
    LastMinute(LastMinuteWindow),
}

impl ValidityRule {
    /// Resolves the validity rule of a stored discount.
    ///
    /// A discount whose validity type names parameters it does not carry
    /// is misconfigured.
    pub(crate) fn resolve(discount: &Discount) -> Result<Self, DomainError> {
        match discount.validity_type {
            ValidityType::Unlimited => Ok(Self::Unlimited),
            ValidityType::DateRange => match (discount.valid_from, discount.valid_until) {
                (Some(valid_from), Some(valid_until)) => Ok(Self::DateRange {
                    valid_from,
                    valid_until,
                }),
                _ => Err(DomainError::DiscountConfiguration {
                    name: discount.name.clone(),
                    reason: String::from("date range is missing validFrom or validUntil"),
                }),
            },
            ValidityType::LastMinute => discount.last_minute.map(Self::LastMinute).ok_or_else(|| {
                DomainError::DiscountConfiguration {
                    name: discount.name.clone(),
                    reason: String::from("last-minute discount is missing its window"),
                }
            }),
        }
    }

    /// Checks the rule against the property-local evaluation date.
    fn check(self, today: Date, stay: &Stay) -> Result<(), Ineligibility> {
        match self {
            Self::Unlimited => Ok(()),
            Self::DateRange {
                valid_from,
                valid_until,
            } => {
                if today < valid_from {
                    Err(Ineligibility::NotYetValid)
                } else if today > valid_until {
                    Err(Ineligibility::Expired)
                } else {
                    Ok(())
                }
            }
            Self::LastMinute(window) => {
                let days_until_arrival: i64 = (stay.check_in() - today).whole_days();
                if days_until_arrival > i64::from(window.days_before_arrival) {
                    Err(Ineligibility::TooFarFromArrival)
                } else if days_until_arrival == 0 && !window.include_arrival_day {
                    Err(Ineligibility::ArrivalDayExcluded)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Fails if the discount lacks data the evaluation depends on.
pub(crate) fn ensure_evaluable(discount: &Discount) -> Result<ValidityRule, DomainError> {
    required_value(discount)?;
    ValidityRule::resolve(discount)
}

/// Runs every rule after the active and structural checks.
pub(crate) fn check_rules(
    discount: &Discount,
    validity: ValidityRule,
    context: &BookingContext,
    today: Date,
) -> Result<(), Ineligibility> {
    check_location(discount, context)?;
    check_room(discount, context)?;
    validity.check(today, context.stay())?;
    check_restrictions(&discount.restrictions, context)?;
    check_usage(&discount.usage_limit)
}

fn check_location(discount: &Discount, context: &BookingContext) -> Result<(), Ineligibility> {
    if discount.location.covers(context.location()) {
        Ok(())
    } else {
        Err(Ineligibility::LocationMismatch)
    }
}

fn check_room(discount: &Discount, context: &BookingContext) -> Result<(), Ineligibility> {
    // A room list takes precedence over a category list
    if !discount.applicable_rooms.is_empty() {
        if discount.applicable_rooms.contains(context.room_id()) {
            return Ok(());
        }
        return Err(Ineligibility::RoomNotCovered);
    }
    if !discount.applicable_categories.is_empty()
        && !discount
            .applicable_categories
            .contains(context.room_category())
    {
        return Err(Ineligibility::CategoryNotCovered);
    }
    Ok(())
}

fn check_restrictions(
    restrictions: &Restrictions,
    context: &BookingContext,
) -> Result<(), Ineligibility> {
    let nights: u32 = context.nights();
    if nights < restrictions.min_nights {
        return Err(Ineligibility::TooFewNights);
    }
    if restrictions.max_nights.is_some_and(|max| nights > max) {
        return Err(Ineligibility::TooManyNights);
    }

    let guests: u32 = context.guest_count();
    if guests < restrictions.min_guests {
        return Err(Ineligibility::TooFewGuests);
    }
    if restrictions.max_guests.is_some_and(|max| guests > max) {
        return Err(Ineligibility::TooManyGuests);
    }

    if !restrictions.valid_days_of_week.is_empty()
        && !restrictions
            .valid_days_of_week
            .contains(&context.stay().check_in_weekday())
    {
        return Err(Ineligibility::CheckInDayExcluded);
    }

    if context.is_tourist() {
        if !restrictions.applicable_for_tourists {
            return Err(Ineligibility::NotForTourists);
        }
    } else if !restrictions.applicable_for_israelis {
        return Err(Ineligibility::NotForIsraelis);
    }

    Ok(())
}

const fn check_usage(usage: &UsageLimit) -> Result<(), Ineligibility> {
    if usage.is_exhausted() {
        Err(Ineligibility::UsageLimitReached)
    } else {
        Ok(())
    }
}
