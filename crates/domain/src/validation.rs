// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Discount, DiscountType, ValidityType};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Highest allowed discount priority.
pub const MAX_PRIORITY: u8 = 10;

/// Validates a discount before it is stored.
///
/// This is the creation-time check the admin form performs. The evaluator
/// does not repeat it.
///
/// # Arguments
///
/// * `discount` - The discount to validate
///
/// # Returns
///
/// * `Ok(())` if the discount is well-formed
/// * `Err(DomainError::InvalidDiscount)` describing the first problem found
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The value is missing or not positive, or a percentage exceeds 100
/// - A date range is missing a bound or is not increasing
/// - A last-minute discount has no window
/// - The priority exceeds 10
/// - Night or guest bounds are zero or inverted
/// - A weekday is outside 0-6
/// - The usage cap is zero or already exceeded
pub fn validate_discount(discount: &Discount) -> Result<(), DomainError> {
    let fail = |field: &'static str, reason: &str| DomainError::InvalidDiscount {
        name: discount.name.clone(),
        field,
        reason: reason.to_string(),
    };

    // Rule: name must not be blank
    if discount.name.trim().is_empty() {
        return Err(fail("name", "cannot be empty"));
    }

    // Rule: value must be present and positive; percentages at most 100
    let value: Decimal = discount
        .discount_value
        .ok_or_else(|| fail("discountValue", "is required"))?;
    if value <= Decimal::ZERO {
        return Err(fail("discountValue", "must be greater than 0"));
    }
    if discount.discount_type == DiscountType::Percentage && value > Decimal::ONE_HUNDRED {
        return Err(fail("discountValue", "cannot exceed 100 for a percentage"));
    }

    match discount.validity_type {
        ValidityType::Unlimited => {}
        ValidityType::DateRange => {
            let (Some(valid_from), Some(valid_until)) = (discount.valid_from, discount.valid_until)
            else {
                return Err(fail("validFrom", "and validUntil are required for a date range"));
            };
            if valid_from >= valid_until {
                return Err(fail("validUntil", "must be after validFrom"));
            }
        }
        ValidityType::LastMinute => {
            if discount.last_minute.is_none() {
                return Err(fail(
                    "lastMinute",
                    "is required for a last-minute discount",
                ));
            }
        }
    }

    if discount.priority > MAX_PRIORITY {
        return Err(fail("priority", "must be between 0 and 10"));
    }

    let restrictions = &discount.restrictions;
    if restrictions.min_nights == 0 {
        return Err(fail("minNights", "must be at least 1"));
    }
    if restrictions
        .max_nights
        .is_some_and(|max| max < restrictions.min_nights)
    {
        return Err(fail("maxNights", "cannot be less than minNights"));
    }
    if restrictions.min_guests == 0 {
        return Err(fail("minGuests", "must be at least 1"));
    }
    if restrictions
        .max_guests
        .is_some_and(|max| max < restrictions.min_guests)
    {
        return Err(fail("maxGuests", "cannot be less than minGuests"));
    }
    if restrictions.valid_days_of_week.iter().any(|day| *day > 6) {
        return Err(fail("validDaysOfWeek", "must only contain days 0-6"));
    }

    let usage = &discount.usage_limit;
    if let Some(max_uses) = usage.max_uses {
        if max_uses == 0 {
            return Err(fail("maxUses", "must be greater than 0"));
        }
        if usage.current_uses > max_uses {
            return Err(fail("currentUses", "cannot exceed maxUses"));
        }
    }

    Ok(())
}

/// Validates every discount in a catalogue.
///
/// In addition to `validate_discount`, persisted identifiers must be
/// unique within the catalogue since they key the usage ledger.
///
/// # Errors
///
/// Returns the first validation failure, or `DomainError::DuplicateDiscountId`.
pub fn validate_catalogue(discounts: &[Discount]) -> Result<(), DomainError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for discount in discounts {
        validate_discount(discount)?;

        if let Some(id) = discount.id.as_deref()
            && !seen.insert(id)
        {
            return Err(DomainError::DuplicateDiscountId(id.to_string()));
        }
    }

    Ok(())
}
