// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::iso_date;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;

/// A guesthouse branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The branch next to the airport.
    Airport,
    /// The Rothschild boulevard branch.
    Rothschild,
}

impl Location {
    /// Converts this location to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Airport => "airport",
            Self::Rothschild => "rothschild",
        }
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "airport" => Ok(Self::Airport),
            "rothschild" => Ok(Self::Rothschild),
            _ => Err(DomainError::InvalidLocation(s.to_string())),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The branches a discount is offered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    /// Airport branch only.
    Airport,
    /// Rothschild branch only.
    Rothschild,
    /// Every branch.
    #[default]
    Both,
}

impl LocationScope {
    /// Returns whether a booking at `location` falls within this scope.
    #[must_use]
    pub const fn covers(&self, location: Location) -> bool {
        matches!(
            (self, location),
            (Self::Both, _)
                | (Self::Airport, Location::Airport)
                | (Self::Rothschild, Location::Rothschild)
        )
    }
}

impl From<Location> for LocationScope {
    fn from(location: Location) -> Self {
        match location {
            Location::Airport => Self::Airport,
            Location::Rothschild => Self::Rothschild,
        }
    }
}

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// The value is a percentage of the amount, in (0, 100].
    Percentage,
    /// The value is a currency amount.
    FixedAmount,
}

impl DiscountType {
    /// Converts this discount type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

impl FromStr for DiscountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed_amount" => Ok(Self::FixedAmount),
            _ => Err(DomainError::InvalidDiscountType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When a discount may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidityType {
    /// Always valid.
    #[default]
    Unlimited,
    /// Valid between `valid_from` and `valid_until`, inclusive.
    DateRange,
    /// Valid for arrivals within a number of days of the evaluation date.
    LastMinute,
}

impl ValidityType {
    /// Converts this validity type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unlimited => "unlimited",
            Self::DateRange => "date_range",
            Self::LastMinute => "last_minute",
        }
    }
}

impl FromStr for ValidityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unlimited" => Ok(Self::Unlimited),
            "date_range" => Ok(Self::DateRange),
            "last_minute" => Ok(Self::LastMinute),
            _ => Err(DomainError::InvalidValidityType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValidityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A room identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId {
    value: String,
}

impl RoomId {
    /// Creates a new `RoomId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|value| Self::new(&value))
    }
}

/// A room category label (e.g. "deluxe", "dorm").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomCategory {
    label: String,
}

impl RoomCategory {
    /// Creates a new `RoomCategory`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.trim().to_string(),
        }
    }

    /// Returns the category label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<'de> Deserialize<'de> for RoomCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|label| Self::new(&label))
    }
}

/// Parameters of a last-minute discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMinuteWindow {
    /// Maximum number of days between the evaluation date and arrival.
    pub days_before_arrival: u32,
    /// Whether same-day arrivals qualify.
    pub include_arrival_day: bool,
}

/// Booking restrictions attached to a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restrictions {
    /// Minimum number of nights.
    pub min_nights: u32,
    /// Maximum number of nights, if capped.
    pub max_nights: Option<u32>,
    /// Minimum number of guests.
    pub min_guests: u32,
    /// Maximum number of guests, if capped.
    pub max_guests: Option<u32>,
    /// Check-in weekdays the discount applies to (0 = Sunday). Empty means every day.
    pub valid_days_of_week: BTreeSet<u8>,
    /// Whether foreign tourists qualify.
    pub applicable_for_tourists: bool,
    /// Whether Israeli residents qualify.
    pub applicable_for_israelis: bool,
}

impl Default for Restrictions {
    fn default() -> Self {
        Self {
            min_nights: 1,
            max_nights: None,
            min_guests: 1,
            max_guests: None,
            valid_days_of_week: BTreeSet::new(),
            applicable_for_tourists: true,
            applicable_for_israelis: true,
        }
    }
}

/// Usage cap of a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageLimit {
    /// Maximum number of redemptions; `None` means uncapped.
    pub max_uses: Option<u32>,
    /// Redemptions recorded so far.
    pub current_uses: u32,
}

impl UsageLimit {
    /// Creates a capped usage limit.
    #[must_use]
    pub const fn capped(max_uses: u32, current_uses: u32) -> Self {
        Self {
            max_uses: Some(max_uses),
            current_uses,
        }
    }

    /// Returns whether no further redemption is allowed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        match self.max_uses {
            Some(max) => self.current_uses >= max,
            None => false,
        }
    }

    /// Returns the number of redemptions left, or `None` when uncapped.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        match self.max_uses {
            Some(max) => Some(max.saturating_sub(self.current_uses)),
            None => None,
        }
    }
}

const fn default_active() -> bool {
    true
}

/// A configured pricing rule that may reduce a booking's price.
///
/// The record mirrors the stored document: fields that a well-formed
/// discount must carry (`discount_value`, the validity dates) are still
/// optional here so that a broken record can be recognised and reported
/// instead of silently failing to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Persisted identifier; used as the usage ledger key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How `discount_value` is interpreted.
    pub discount_type: DiscountType,
    /// Percentage or currency amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_value: Option<Decimal>,
    /// Branches the discount is offered at.
    #[serde(default)]
    pub location: LocationScope,
    /// Rooms the discount is limited to. Empty means all rooms.
    #[serde(default)]
    pub applicable_rooms: BTreeSet<RoomId>,
    /// Room categories the discount is limited to. Empty means all categories.
    #[serde(default)]
    pub applicable_categories: BTreeSet<RoomCategory>,
    /// Validity rule.
    #[serde(default)]
    pub validity_type: ValidityType,
    /// First valid day (date range only).
    #[serde(default, with = "iso_date::option")]
    pub valid_from: Option<Date>,
    /// Last valid day (date range only).
    #[serde(default, with = "iso_date::option")]
    pub valid_until: Option<Date>,
    /// Last-minute window (last minute only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_minute: Option<LastMinuteWindow>,
    /// Booking restrictions.
    #[serde(default)]
    pub restrictions: Restrictions,
    /// 0-10, higher is preferred.
    #[serde(default)]
    pub priority: u8,
    /// Whether the discount may stack with others.
    #[serde(default)]
    pub combinable: bool,
    /// Usage cap.
    #[serde(default)]
    pub usage_limit: UsageLimit,
    /// Inactive discounts never apply.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Discount {
    /// Creates an active, unlimited, non-combinable percentage discount
    /// offered at every branch.
    #[must_use]
    pub fn percentage(name: &str, percent: Decimal) -> Self {
        Self::with_type(name, DiscountType::Percentage, percent)
    }

    /// Creates an active, unlimited, non-combinable fixed-amount discount
    /// offered at every branch.
    #[must_use]
    pub fn fixed_amount(name: &str, amount: Decimal) -> Self {
        Self::with_type(name, DiscountType::FixedAmount, amount)
    }

    fn with_type(name: &str, discount_type: DiscountType, value: Decimal) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: None,
            discount_type,
            discount_value: Some(value),
            location: LocationScope::Both,
            applicable_rooms: BTreeSet::new(),
            applicable_categories: BTreeSet::new(),
            validity_type: ValidityType::Unlimited,
            valid_from: None,
            valid_until: None,
            last_minute: None,
            restrictions: Restrictions::default(),
            priority: 0,
            combinable: false,
            usage_limit: UsageLimit::default(),
            is_active: true,
        }
    }

    /// Sets the persisted identifier.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the branches the discount is offered at.
    #[must_use]
    pub const fn with_location(mut self, location: LocationScope) -> Self {
        self.location = location;
        self
    }

    /// Limits the discount to the given rooms.
    #[must_use]
    pub fn for_rooms<I>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = RoomId>,
    {
        self.applicable_rooms = rooms.into_iter().collect();
        self
    }

    /// Limits the discount to the given room categories.
    #[must_use]
    pub fn for_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = RoomCategory>,
    {
        self.applicable_categories = categories.into_iter().collect();
        self
    }

    /// Makes the discount valid between two dates, inclusive.
    #[must_use]
    pub const fn valid_between(mut self, valid_from: Date, valid_until: Date) -> Self {
        self.validity_type = ValidityType::DateRange;
        self.valid_from = Some(valid_from);
        self.valid_until = Some(valid_until);
        self
    }

    /// Makes the discount a last-minute discount.
    #[must_use]
    pub const fn last_minute(mut self, days_before_arrival: u32, include_arrival_day: bool) -> Self {
        self.validity_type = ValidityType::LastMinute;
        self.last_minute = Some(LastMinuteWindow {
            days_before_arrival,
            include_arrival_day,
        });
        self
    }

    /// Replaces the booking restrictions.
    #[must_use]
    pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether the discount stacks with others.
    #[must_use]
    pub const fn with_combinable(mut self, combinable: bool) -> Self {
        self.combinable = combinable;
        self
    }

    /// Sets the usage cap.
    #[must_use]
    pub const fn with_usage_limit(mut self, usage_limit: UsageLimit) -> Self {
        self.usage_limit = usage_limit;
        self
    }

    /// Marks the discount inactive.
    #[must_use]
    pub const fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
