// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::applicability::{Applicability, Ineligibility, check_rules, ensure_evaluable};
use crate::calendar::{DEFAULT_TIMEZONE, local_date, parse_timezone};
use crate::pricing::{PricingOutcome, apply_discounts};
use crate::selection::{rank_by_priority, resolve_stack};
use chrono_tz::Tz;
use innkeep_domain::{BookingContext, Discount, DomainError};
use rust_decimal::Decimal;
use time::Date;
use tracing::debug;

/// Decides which discounts apply to a booking and prices it.
///
/// The evaluator is stateless apart from the property's time zone and may
/// be shared freely between concurrent requests. It never mutates a
/// discount: recording a redemption is the usage ledger's job, and the
/// ledger may still refuse a discount this evaluator accepted.
#[derive(Debug, Clone, Copy)]
pub struct DiscountEvaluator {
    timezone: Tz,
}

impl Default for DiscountEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

/// The discounts chosen for a booking and the resulting price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote<'a> {
    /// Discounts applied, in application order.
    pub selected: Vec<&'a Discount>,
    /// Price breakdown.
    pub pricing: PricingOutcome,
}

impl DiscountEvaluator {
    /// Creates an evaluator for a property in `timezone`.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Creates an evaluator from an IANA time zone name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn from_timezone_name(name: &str) -> Result<Self, DomainError> {
        Ok(Self::new(parse_timezone(name)?))
    }

    /// Returns the property's time zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the property-local date of the booking's evaluation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation time is out of range.
    pub fn today(&self, context: &BookingContext) -> Result<Date, DomainError> {
        local_date(context.now(), self.timezone)
    }

    /// Checks a discount against a booking and reports the first failed rule.
    ///
    /// An inactive discount is never applicable, whatever else it contains.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DiscountConfiguration` if an active discount is
    /// missing its value or validity parameters. A misconfigured discount is
    /// an error, never merely "not applicable".
    pub fn check_applicability(
        &self,
        discount: &Discount,
        context: &BookingContext,
    ) -> Result<Applicability, DomainError> {
        if !discount.is_active {
            return Ok(Applicability::NotApplicable(Ineligibility::Inactive));
        }

        let validity = ensure_evaluable(discount)?;
        let today: Date = self.today(context)?;
        let applicability: Applicability =
            check_rules(discount, validity, context, today).into();

        if let Some(reason) = applicability.ineligibility() {
            debug!("Discount '{}' not applicable: {}", discount.name, reason);
        }

        Ok(applicability)
    }

    /// Returns whether a discount applies to a booking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DiscountConfiguration` if an active discount is
    /// misconfigured.
    pub fn is_applicable(
        &self,
        discount: &Discount,
        context: &BookingContext,
    ) -> Result<bool, DomainError> {
        Ok(self.check_applicability(discount, context)?.is_applicable())
    }

    /// Chooses the discounts to apply to a booking, in application order.
    ///
    /// Applicable discounts are ranked by descending priority (ties keep
    /// input order). The top one is always chosen; lower ones follow only
    /// while every chosen discount is combinable.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error among the candidates.
    pub fn select_applicable_discounts<'a>(
        &self,
        candidates: &'a [Discount],
        context: &BookingContext,
    ) -> Result<Vec<&'a Discount>, DomainError> {
        let mut applicable: Vec<&Discount> = Vec::new();
        for discount in candidates {
            if self.is_applicable(discount, context)? {
                applicable.push(discount);
            }
        }

        rank_by_priority(&mut applicable);
        let selected: Vec<&Discount> = resolve_stack(applicable);

        debug!(
            "Selected {} of {} candidate discounts for room {}",
            selected.len(),
            candidates.len(),
            context.room_id().value()
        );

        Ok(selected)
    }

    /// Selects the discounts for a booking and applies them to `base_amount`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error among the candidates.
    pub fn quote<'a>(
        &self,
        candidates: &'a [Discount],
        context: &BookingContext,
        base_amount: Decimal,
    ) -> Result<Quote<'a>, DomainError> {
        let selected: Vec<&Discount> = self.select_applicable_discounts(candidates, context)?;
        let pricing: PricingOutcome = apply_discounts(selected.iter().copied(), base_amount)?;
        Ok(Quote { selected, pricing })
    }
}
