// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use innkeep_domain::UsageLimit;

use crate::data_models::{DiscountUsageRow, DiscountUsageSummary, usage_from_columns};
use crate::diesel_schema::discount_usage;
use crate::error::PersistenceError;

/// Retrieves the counter of one discount.
///
/// # Errors
///
/// Returns `PersistenceError::DiscountNotRegistered` if there is no counter.
pub fn get_usage(
    conn: &mut SqliteConnection,
    discount_id: &str,
) -> Result<UsageLimit, PersistenceError> {
    let row: DiscountUsageRow = discount_usage::table
        .filter(discount_usage::discount_id.eq(discount_id))
        .select(DiscountUsageRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::DiscountNotRegistered(discount_id.to_string()))?;

    usage_from_columns(&row.discount_id, row.max_uses, row.current_uses)
}

/// Lists every counter, ordered by discount id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is out of range.
pub fn list_usage(
    conn: &mut SqliteConnection,
) -> Result<Vec<DiscountUsageSummary>, PersistenceError> {
    discount_usage::table
        .order(discount_usage::discount_id.asc())
        .select(DiscountUsageRow::as_select())
        .load::<DiscountUsageRow>(conn)?
        .into_iter()
        .map(DiscountUsageRow::into_summary)
        .collect()
}
