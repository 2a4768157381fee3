// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Discount amounts and stacked application.
//!
//! ## Invariants
//!
//! - A computed discount amount is always within `[0, amount discounted]`
//! - A negative base amount is treated as zero
//! - Stacked discounts compound: each one is computed against what is
//!   left after the discounts before it

use innkeep_domain::{Discount, DiscountType, DomainError, Stay};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Decimal places of the currency (agorot).
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// One discount's share of a priced booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    /// Persisted identifier of the discount, if any.
    pub id: Option<String>,
    /// Discount name for receipts.
    pub name: String,
    /// How the discount value was interpreted.
    pub discount_type: DiscountType,
    /// Amount taken off by this discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Amount left to pay after this discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_after: Decimal,
}

/// The result of applying a sequence of discounts to a base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOutcome {
    /// Amount before discounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_amount: Decimal,
    /// Sum of all discount amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal,
    /// Amount payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    /// Per-discount breakdown, in application order.
    pub applied: Vec<AppliedDiscount>,
}

/// Returns the discount value, or a configuration error if it is missing.
pub(crate) fn required_value(discount: &Discount) -> Result<Decimal, DomainError> {
    discount
        .discount_value
        .ok_or_else(|| DomainError::DiscountConfiguration {
            name: discount.name.clone(),
            reason: String::from("discountValue is missing"),
        })
}

/// Computes how much a single discount takes off `base_amount`.
///
/// - Percentage: `base_amount * value / 100`, rounded to agorot
/// - Fixed amount: `min(value, base_amount)`
///
/// The result is clamped into `[0, base_amount]`.
///
/// # Errors
///
/// Returns `DomainError::DiscountConfiguration` if the discount has no value.
pub fn compute_discount_amount(
    discount: &Discount,
    base_amount: Decimal,
) -> Result<Decimal, DomainError> {
    let value: Decimal = required_value(discount)?;
    let base: Decimal = base_amount.max(Decimal::ZERO);

    let amount: Decimal = match discount.discount_type {
        DiscountType::Percentage => base
            .checked_mul(value)
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            .map_or(base, |share| {
                share.round_dp_with_strategy(
                    CURRENCY_DECIMAL_PLACES,
                    RoundingStrategy::MidpointAwayFromZero,
                )
            }),
        DiscountType::FixedAmount => value.min(base),
    };

    Ok(amount.clamp(Decimal::ZERO, base))
}

/// Applies discounts in order, each against the running remaining amount.
///
/// # Arguments
///
/// * `selected` - Discounts in application order (usually the output of
///   `DiscountEvaluator::select_applicable_discounts`)
/// * `base_amount` - Amount before discounts
///
/// # Errors
///
/// Returns `DomainError::DiscountConfiguration` if a discount has no value.
///
/// # Example
///
/// ```text
/// base 1000, [10%, 50 fixed]
/// 10%      -> 100, remaining 900
/// 50 fixed ->  50, remaining 850
/// total discount 150, final 850
/// ```
pub fn apply_discounts<'a, I>(
    selected: I,
    base_amount: Decimal,
) -> Result<PricingOutcome, DomainError>
where
    I: IntoIterator<Item = &'a Discount>,
{
    let base: Decimal = base_amount.max(Decimal::ZERO);
    let mut remaining: Decimal = base;
    let mut applied: Vec<AppliedDiscount> = Vec::new();

    for discount in selected {
        let amount: Decimal = compute_discount_amount(discount, remaining)?;
        remaining -= amount;
        applied.push(AppliedDiscount {
            id: discount.id.clone(),
            name: discount.name.clone(),
            discount_type: discount.discount_type,
            amount,
            remaining_after: remaining,
        });
    }

    Ok(PricingOutcome {
        base_amount: base,
        total_discount: base - remaining,
        final_amount: remaining,
        applied,
    })
}

/// Returns the undiscounted price of a stay at a nightly rate.
///
/// Saturates at `Decimal::MAX` rather than overflowing.
#[must_use]
pub fn base_amount_for_stay(nightly_rate: Decimal, stay: &Stay) -> Decimal {
    nightly_rate
        .max(Decimal::ZERO)
        .checked_mul(Decimal::from(stay.nights()))
        .unwrap_or(Decimal::MAX)
}
