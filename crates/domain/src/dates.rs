// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date helpers shared by the discount and booking records.
//!
//! Stored records carry plain ISO 8601 calendar dates (`YYYY-MM-DD`).

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Returns the weekday of `date` numbered from Sunday (0) to Saturday (6).
#[must_use]
pub const fn weekday_number(date: Date) -> u8 {
    date.weekday().number_days_from_sunday()
}
