// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::io::Write;
use std::path::Path;

use innkeep::{DiscountEvaluator, PricingOutcome, Quote, base_amount_for_stay};
use innkeep_audit::{Actor, Cause};
use innkeep_domain::{BookingContext, Discount};
use innkeep_persistence::{
    DiscountUsageSummary, PersistenceError, SqlitePersistence, UsageReceipt,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::args::QuoteArgs;
use crate::catalogue::load_catalogue;
use crate::error::CliError;

/// How often `redeem` re-prices a booking after losing a capped discount.
pub const MAX_REDEEM_ATTEMPTS: usize = 3;

/// Actor type recorded for redemptions made from the command line.
pub const OPERATOR_ACTOR_TYPE: &str = "operator";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub nights: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub nightly_rate: Decimal,
    pub selected: Vec<String>,
    pub pricing: PricingOutcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemReport {
    pub booking_ref: String,
    pub quote: QuoteReport,
    pub receipts: Vec<UsageReceipt>,
}

/// A booking ready to be priced.
pub struct PreparedQuote {
    pub evaluator: DiscountEvaluator,
    pub context: BookingContext,
    pub catalogue: Vec<Discount>,
    pub base_amount: Decimal,
    pub nightly_rate: Decimal,
}

impl PreparedQuote {
    /// Loads the catalogue and builds the booking context from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue, booking or time zone is invalid.
    pub fn from_args(args: &QuoteArgs) -> Result<Self, CliError> {
        let evaluator: DiscountEvaluator = DiscountEvaluator::from_timezone_name(&args.timezone)?;
        let context: BookingContext = args
            .booking
            .to_input()
            .into_context(args.booking.evaluation_time())?;
        let catalogue: Vec<Discount> = load_catalogue(&args.discounts)?;
        let base_amount: Decimal = base_amount_for_stay(args.nightly_rate, context.stay());

        Ok(Self {
            evaluator,
            context,
            catalogue,
            base_amount,
            nightly_rate: args.nightly_rate,
        })
    }

    /// Selects and applies discounts.
    ///
    /// # Errors
    ///
    /// Returns an error if a discount is misconfigured.
    pub fn quote(&self) -> Result<Quote<'_>, CliError> {
        Ok(self
            .evaluator
            .quote(&self.catalogue, &self.context, self.base_amount)?)
    }

    fn report(&self, quote: &Quote<'_>) -> QuoteReport {
        QuoteReport {
            nights: self.context.nights(),
            nightly_rate: self.nightly_rate,
            selected: quote
                .selected
                .iter()
                .map(|d| d.id.clone().unwrap_or_else(|| d.name.clone()))
                .collect(),
            pricing: quote.pricing.clone(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Validates a catalogue file.
///
/// # Errors
///
/// Returns an error naming the first misconfigured discount.
pub fn validate(discounts: &Path) -> Result<(), CliError> {
    let catalogue: Vec<Discount> = load_catalogue(discounts)?;
    info!("{} discounts are valid", catalogue.len());
    Ok(())
}

/// Builds the quote report for a booking.
///
/// # Errors
///
/// Returns an error if the inputs are invalid.
pub fn build_quote(args: &QuoteArgs) -> Result<QuoteReport, CliError> {
    let prepared: PreparedQuote = PreparedQuote::from_args(args)?;
    let quote: Quote<'_> = prepared.quote()?;
    Ok(prepared.report(&quote))
}

/// Prices a booking and prints the quote.
///
/// # Errors
///
/// Returns an error if the inputs are invalid.
pub fn quote(args: &QuoteArgs) -> Result<(), CliError> {
    print_json(&build_quote(args)?)
}

/// Prices a booking against the ledger's counters and commits the
/// redemption.
///
/// When another booking takes the last use of a selected discount between
/// pricing and commit, the booking is re-priced with fresh counters, up to
/// `MAX_REDEEM_ATTEMPTS` times.
///
/// # Errors
///
/// Returns an error if the inputs are invalid, the ledger fails, or every
/// attempt loses a capped discount.
pub fn build_redemption(
    args: &QuoteArgs,
    ledger: &mut SqlitePersistence,
    actor: &Actor,
    booking_ref: &str,
) -> Result<RedeemReport, CliError> {
    let mut prepared: PreparedQuote = PreparedQuote::from_args(args)?;
    let cause: Cause = Cause::booking(booking_ref);
    let mut attempt: usize = 1;

    loop {
        ledger.refresh_usage(&mut prepared.catalogue)?;
        let quote: Quote<'_> = prepared.quote()?;

        match ledger.record_usage(&quote.selected, actor, &cause) {
            Ok(receipts) => {
                return Ok(RedeemReport {
                    booking_ref: booking_ref.to_string(),
                    quote: prepared.report(&quote),
                    receipts,
                });
            }
            Err(e @ PersistenceError::UsageLimitReached { .. })
                if attempt < MAX_REDEEM_ATTEMPTS =>
            {
                warn!(attempt, "{e}; re-pricing booking {booking_ref}");
                attempt += 1;
            }
            Err(e @ PersistenceError::UsageLimitReached { .. }) => {
                return Err(CliError::RedemptionContended {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prices a booking, commits the redemption and prints the result.
///
/// # Errors
///
/// See `build_redemption`.
pub fn redeem(
    args: &QuoteArgs,
    database: &Path,
    actor_id: &str,
    booking_ref: &str,
) -> Result<(), CliError> {
    let mut ledger: SqlitePersistence = SqlitePersistence::new_with_file(database)?;
    let actor: Actor = Actor::new(actor_id.to_string(), String::from(OPERATOR_ACTOR_TYPE));

    let report: RedeemReport = build_redemption(args, &mut ledger, &actor, booking_ref)?;
    info!(
        "Booking {} redeemed {} discounts",
        booking_ref,
        report.receipts.len()
    );
    print_json(&report)
}

/// Prints usage statistics.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub fn usage(database: &Path) -> Result<(), CliError> {
    let mut ledger: SqlitePersistence = SqlitePersistence::new_with_file(database)?;
    let summary: Vec<DiscountUsageSummary> = ledger.usage_summary()?;
    print_json(&summary)
}
