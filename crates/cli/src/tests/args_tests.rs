// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use clap::error::ErrorKind;
use innkeep_domain::{BookingContext, BookingContextInput, Location, RoomCategory, RoomId};
use rust_decimal::Decimal;
use time::macros::{date, datetime};
use tracing::level_filters::LevelFilter;

use super::{base_quote_flags, fixture_catalogue, parse_quote_args};
use crate::args::{Args, Command, QuoteArgs};

#[test]
fn test_quote_flags_parse_into_booking_request() {
    let quote: QuoteArgs = parse_quote_args(&base_quote_flags(&fixture_catalogue()));

    let input: BookingContextInput = quote.booking.to_input();
    assert_eq!(input.check_in, Some(date!(2024 - 03 - 10)));
    assert_eq!(input.check_out, None);
    assert_eq!(input.nights, Some(3));
    assert_eq!(input.room_id, Some(RoomId::new("101")));
    assert_eq!(input.room_category, Some(RoomCategory::new("deluxe")));
    assert_eq!(input.location, Some(Location::Airport));
    assert_eq!(input.guest_count, Some(2));
    assert_eq!(input.is_tourist, Some(true));
    assert_eq!(quote.nightly_rate, Decimal::new(400, 0));
    assert_eq!(quote.timezone, "Asia/Jerusalem");
}

#[test]
fn test_now_flag_sets_evaluation_time() {
    let quote: QuoteArgs = parse_quote_args(&base_quote_flags(&fixture_catalogue()));

    assert_eq!(
        quote.booking.evaluation_time(),
        datetime!(2024-03-01 10:00:00 UTC)
    );
}

#[test]
fn test_check_out_replaces_nights() {
    let mut flags: Vec<String> = base_quote_flags(&fixture_catalogue());
    let position: usize = flags.iter().position(|f| f == "--nights").unwrap();
    flags[position] = String::from("--check-out");
    flags[position + 1] = String::from("2024-03-13");

    let quote: QuoteArgs = parse_quote_args(&flags);
    let context: BookingContext = quote
        .booking
        .to_input()
        .into_context(quote.booking.evaluation_time())
        .unwrap();

    assert_eq!(context.nights(), 3);
}

#[test]
fn test_missing_check_out_and_nights_is_rejected() {
    let flags: Vec<String> = base_quote_flags(&fixture_catalogue())
        .into_iter()
        .filter(|f| f != "--nights" && f != "3")
        .collect();

    let err = Args::try_parse_from(&flags).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_unknown_location_is_rejected() {
    let flags: Vec<String> = base_quote_flags(&fixture_catalogue())
        .into_iter()
        .map(|f| if f == "airport" { String::from("haifa") } else { f })
        .collect();

    let err = Args::try_parse_from(&flags).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_malformed_check_in_is_rejected() {
    let flags: Vec<String> = base_quote_flags(&fixture_catalogue())
        .into_iter()
        .map(|f| {
            if f == "2024-03-10" {
                String::from("10/03/2024")
            } else {
                f
            }
        })
        .collect();

    let err = Args::try_parse_from(&flags).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_resident_when_tourist_flag_absent() {
    let flags: Vec<String> = base_quote_flags(&fixture_catalogue())
        .into_iter()
        .filter(|f| f != "--tourist")
        .collect();

    let quote: QuoteArgs = parse_quote_args(&flags);
    assert_eq!(quote.booking.to_input().is_tourist, Some(false));
}

#[test]
fn test_redeem_takes_ledger_and_booking_reference() {
    let mut flags: Vec<String> = base_quote_flags(&fixture_catalogue());
    flags[1] = String::from("r");
    flags.extend(
        ["--database", "ledger.db", "--actor", "desk-1", "--booking-ref", "BK-7"]
            .iter()
            .map(ToString::to_string),
    );

    let args: Args = Args::try_parse_from(&flags).unwrap();
    match args.command {
        Command::Redeem {
            database,
            actor,
            booking_ref,
            ..
        } => {
            assert_eq!(database.to_str(), Some("ledger.db"));
            assert_eq!(actor, "desk-1");
            assert_eq!(booking_ref, "BK-7");
        }
        other => panic!("expected redeem command, got {other:?}"),
    }
}

#[test]
fn test_verbosity_defaults_to_info() {
    let args: Args = Args::try_parse_from(["innkeep", "usage", "--database", "ledger.db"]).unwrap();
    assert_eq!(args.log_level(), LevelFilter::INFO);

    let args: Args =
        Args::try_parse_from(["innkeep", "-v", "usage", "--database", "ledger.db"]).unwrap();
    assert_eq!(args.log_level(), LevelFilter::DEBUG);
}
