// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Property-local calendar dates.
//!
//! Validity windows and last-minute windows are expressed in whole days at
//! the guesthouse, so the evaluation timestamp is first converted to the
//! property's time zone.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use innkeep_domain::DomainError;
use time::{Date, Month, OffsetDateTime};

/// The time zone both branches operate in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;

/// Parses an IANA time zone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `now` in `timezone`.
///
/// # Errors
///
/// Returns `DomainError::InvalidBookingContext` if `now` cannot be
/// represented as a calendar date.
pub fn local_date(now: OffsetDateTime, timezone: Tz) -> Result<Date, DomainError> {
    let out_of_range = || DomainError::InvalidBookingContext {
        reason: format!("evaluation time {now} is out of range"),
    };

    // Convert time::OffsetDateTime to chrono::DateTime<Utc>
    let instant: DateTime<Utc> =
        DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond()).ok_or_else(out_of_range)?;
    let local = instant.with_timezone(&timezone).date_naive();

    // Convert chrono::NaiveDate back to time::Date
    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(out_of_range)?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| out_of_range())?;

    Date::from_calendar_date(local.year(), month, day).map_err(|_| out_of_range())
}
