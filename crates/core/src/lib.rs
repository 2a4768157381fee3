// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Discount applicability and pricing for the innkeep back-office.
//!
//! Everything in this crate is pure: no I/O, no shared mutable state.
//! Usage caps are checked here only as a hint; the usage ledger performs
//! the authoritative check when a redemption is committed.

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

mod applicability;
mod calendar;
mod evaluator;
mod pricing;
mod selection;

#[cfg(test)]
mod tests;

pub use applicability::{Applicability, Ineligibility};
pub use calendar::{DEFAULT_TIMEZONE, local_date, parse_timezone};
pub use evaluator::{DiscountEvaluator, Quote};
pub use pricing::{
    AppliedDiscount, CURRENCY_DECIMAL_PLACES, PricingOutcome, apply_discounts,
    base_amount_for_stay, compute_discount_amount,
};
