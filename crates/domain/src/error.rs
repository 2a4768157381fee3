// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and discount evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A discount failed creation-time validation.
    InvalidDiscount {
        /// The discount name.
        name: String,
        /// The offending field (stored field name).
        field: &'static str,
        /// A human-readable description of the problem.
        reason: String,
    },
    /// A stored discount is missing data the evaluator needs.
    ///
    /// This is never reported as "not applicable": a broken discount
    /// must surface to the caller.
    DiscountConfiguration {
        /// The discount name.
        name: String,
        /// What is missing or inconsistent.
        reason: String,
    },
    /// Two discounts in one catalogue share a persisted identifier.
    DuplicateDiscountId(String),
    /// The booking context is incomplete or inconsistent.
    InvalidBookingContext {
        /// What is missing or inconsistent.
        reason: String,
    },
    /// Location value is not one of the known branches.
    InvalidLocation(String),
    /// Discount type value is not recognised.
    InvalidDiscountType(String),
    /// Validity type value is not recognised.
    InvalidValidityType(String),
    /// Time zone name is not recognised.
    InvalidTimezone(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDiscount {
                name,
                field,
                reason,
            } => {
                write!(f, "Invalid discount '{name}': {field} {reason}")
            }
            Self::DiscountConfiguration { name, reason } => {
                write!(f, "Discount '{name}' is misconfigured: {reason}")
            }
            Self::DuplicateDiscountId(id) => {
                write!(f, "Discount id '{id}' is used by more than one discount")
            }
            Self::InvalidBookingContext { reason } => {
                write!(f, "Invalid booking context: {reason}")
            }
            Self::InvalidLocation(value) => write!(f, "Invalid location: {value}"),
            Self::InvalidDiscountType(value) => write!(f, "Invalid discount type: {value}"),
            Self::InvalidValidityType(value) => write!(f, "Invalid validity type: {value}"),
            Self::InvalidTimezone(value) => write!(f, "Invalid timezone: {value}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
