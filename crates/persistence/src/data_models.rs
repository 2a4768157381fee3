// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable};
use innkeep_domain::UsageLimit;
use serde::Serialize;

use crate::diesel_schema::{audit_events, discount_usage};
use crate::error::PersistenceError;

/// Proof that one redemption of a discount was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReceipt {
    /// The redeemed discount.
    pub discount_id: String,
    /// The audit event recording the redemption.
    pub event_id: i64,
    /// The counter after the redemption.
    pub usage: UsageLimit,
}

/// Usage statistics for one discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountUsageSummary {
    pub discount_id: String,
    pub current_uses: u32,
    pub max_uses: Option<u32>,
    /// Redemptions left; `None` when uncapped.
    pub remaining: Option<u32>,
}

impl DiscountUsageSummary {
    #[must_use]
    pub fn new(discount_id: String, usage: &UsageLimit) -> Self {
        Self {
            discount_id,
            current_uses: usage.current_uses,
            max_uses: usage.max_uses,
            remaining: usage.remaining(),
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = discount_usage)]
pub(crate) struct DiscountUsageRow {
    pub discount_id: String,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
}

/// Counter values returned by the conditional increment.
#[derive(QueryableByName)]
pub(crate) struct CounterRow {
    #[diesel(sql_type = Nullable<Integer>)]
    pub max_uses: Option<i32>,
    #[diesel(sql_type = Integer)]
    pub current_uses: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub(crate) struct AuditEventRow {
    pub event_id: i64,
    pub discount_id: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

/// Converts stored counter columns back into a `UsageLimit`.
pub(crate) fn usage_from_columns(
    discount_id: &str,
    max_uses: Option<i32>,
    current_uses: i32,
) -> Result<UsageLimit, PersistenceError> {
    let out_of_range = |column: &str| {
        PersistenceError::ReconstructionError(format!("{column} out of range for '{discount_id}'"))
    };

    Ok(UsageLimit {
        max_uses: max_uses
            .map(u32::try_from)
            .transpose()
            .map_err(|_| out_of_range("max_uses"))?,
        current_uses: u32::try_from(current_uses).map_err(|_| out_of_range("current_uses"))?,
    })
}

/// Converts a counter value into its column representation.
pub(crate) fn counter_column(discount_id: &str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!(
            "counter value {value} too large for '{discount_id}'"
        ))
    })
}

impl DiscountUsageRow {
    pub(crate) fn into_summary(self) -> Result<DiscountUsageSummary, PersistenceError> {
        let usage: UsageLimit =
            usage_from_columns(&self.discount_id, self.max_uses, self.current_uses)?;
        Ok(DiscountUsageSummary::new(self.discount_id, &usage))
    }
}
