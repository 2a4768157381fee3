// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use innkeep_domain::{
    BookingContextInput, DomainError, Location, RoomCategory, RoomId, parse_date,
};
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Discount evaluation and redemption for the front desk.
#[derive(Debug, Parser)]
#[command(name = "innkeep", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a discount catalogue for misconfigured discounts
    #[command(visible_alias = "v")]
    Validate {
        /// Catalogue file (JSON array of discounts)
        #[arg(short, long)]
        discounts: PathBuf,
    },

    /// Price a booking without recording anything
    #[command(visible_alias = "q")]
    Quote(QuoteArgs),

    /// Price a booking and commit usage of the applied discounts
    #[command(visible_alias = "r")]
    Redeem {
        #[command(flatten)]
        quote: QuoteArgs,

        /// Usage ledger database file
        #[arg(long)]
        database: PathBuf,

        /// Operator committing the booking
        #[arg(long)]
        actor: String,

        /// Booking reference recorded with each redemption
        #[arg(long)]
        booking_ref: String,
    },

    /// Print usage statistics from the ledger
    #[command(visible_alias = "u")]
    Usage {
        /// Usage ledger database file
        #[arg(long)]
        database: PathBuf,
    },
}

/// A booking to price, and the catalogue and rate to price it with.
#[derive(Debug, Clone, ClapArgs)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub booking: BookingArgs,

    /// Catalogue file (JSON array of discounts)
    #[arg(short, long)]
    pub discounts: PathBuf,

    /// Undiscounted price per night
    #[arg(long)]
    pub nightly_rate: Decimal,

    /// Property time zone (IANA name)
    #[arg(long, default_value = "Asia/Jerusalem")]
    pub timezone: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BookingArgs {
    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub check_in: Date,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, required_unless_present = "nights")]
    pub check_out: Option<Date>,

    /// Number of nights, instead of a departure date
    #[arg(long)]
    pub nights: Option<u32>,

    /// Booked room
    #[arg(long)]
    pub room: String,

    /// Booked room's category
    #[arg(long)]
    pub category: String,

    /// Branch: airport or rothschild
    #[arg(long)]
    pub location: Location,

    /// Number of guests
    #[arg(long)]
    pub guests: u32,

    /// The guest is a foreign tourist
    #[arg(long)]
    pub tourist: bool,

    /// Evaluation time (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    pub now: Option<OffsetDateTime>,
}

impl BookingArgs {
    /// Converts the flags into a booking request.
    pub fn to_input(&self) -> BookingContextInput {
        BookingContextInput {
            check_in: Some(self.check_in),
            check_out: self.check_out,
            nights: self.nights,
            room_id: Some(RoomId::new(&self.room)),
            room_category: Some(RoomCategory::new(&self.category)),
            location: Some(self.location),
            guest_count: Some(self.guests),
            is_tourist: Some(self.tourist),
        }
    }

    /// Returns the evaluation time, defaulting to the current time.
    pub fn evaluation_time(&self) -> OffsetDateTime {
        self.now.unwrap_or_else(OffsetDateTime::now_utc)
    }
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value.trim(), &Rfc3339).map_err(|e| {
        DomainError::InvalidBookingContext {
            reason: format!("invalid evaluation time '{value}': {e}"),
        }
    })
}
