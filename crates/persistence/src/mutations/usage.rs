// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Usage counter mutations.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Text};
use diesel::SqliteConnection;
use innkeep_domain::UsageLimit;
use tracing::{debug, warn};

use crate::data_models::{CounterRow, counter_column, usage_from_columns};
use crate::diesel_schema::discount_usage;
use crate::error::PersistenceError;

/// Registers a discount's counter, or updates the cap of an existing one.
///
/// A new row is seeded with `limit.current_uses`. For an existing row only
/// `max_uses` changes: the stored counter is authoritative. A cap below the
/// stored counter is raised to the counter, which leaves the discount
/// exhausted.
///
/// # Errors
///
/// Returns an error if the statement fails (e.g. a zero cap, or a new
/// counter seeded above its cap).
pub fn register_usage(
    conn: &mut SqliteConnection,
    discount_id: &str,
    limit: &UsageLimit,
) -> Result<(), PersistenceError> {
    let max_uses: Option<i32> = limit
        .max_uses
        .map(|max| counter_column(discount_id, max))
        .transpose()?;
    let current_uses: i32 = counter_column(discount_id, limit.current_uses)?;

    // NOTE: raw SQL; the DSL has no scalar MAX for the clamped cap.
    let rows: Vec<CounterRow> = diesel::sql_query(
        "INSERT INTO discount_usage (discount_id, max_uses, current_uses) \
         VALUES (?, ?, ?) \
         ON CONFLICT (discount_id) DO UPDATE SET max_uses = CASE \
             WHEN excluded.max_uses IS NULL THEN NULL \
             ELSE MAX(excluded.max_uses, discount_usage.current_uses) \
         END \
         RETURNING max_uses, current_uses",
    )
    .bind::<Text, _>(discount_id)
    .bind::<Nullable<Integer>, _>(max_uses)
    .bind::<Integer, _>(current_uses)
    .load(conn)?;

    if let Some(row) = rows.first()
        && row.max_uses != max_uses
    {
        warn!(
            discount_id,
            requested = ?max_uses,
            stored = ?row.max_uses,
            "Cap is below the stored counter; clamped"
        );
    }

    debug!(discount_id, ?max_uses, "Registered usage counter");
    Ok(())
}

/// Registers a discount's counter only if it has none yet.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn seed_usage(
    conn: &mut SqliteConnection,
    discount_id: &str,
    limit: &UsageLimit,
) -> Result<(), PersistenceError> {
    let max_uses: Option<i32> = limit
        .max_uses
        .map(|max| counter_column(discount_id, max))
        .transpose()?;
    let current_uses: i32 = counter_column(discount_id, limit.current_uses)?;

    diesel::insert_into(discount_usage::table)
        .values((
            discount_usage::discount_id.eq(discount_id),
            discount_usage::max_uses.eq(max_uses),
            discount_usage::current_uses.eq(current_uses),
        ))
        .on_conflict(discount_usage::discount_id)
        .do_nothing()
        .execute(conn)?;

    Ok(())
}

/// Adds one use to a counter if it is below its cap.
///
/// The check and the increment are a single statement, so two writers can
/// never both take the last remaining use.
///
/// # Returns
///
/// The counter after the increment.
///
/// # Errors
///
/// Returns `PersistenceError::UsageLimitReached` if the counter is at its
/// cap, or `PersistenceError::DiscountNotRegistered` if there is no counter.
pub fn increment_usage(
    conn: &mut SqliteConnection,
    discount_id: &str,
) -> Result<UsageLimit, PersistenceError> {
    // NOTE: raw SQL; the nullable-cap comparison and RETURNING are clearer
    // here than in the DSL.
    let rows: Vec<CounterRow> = diesel::sql_query(
        "UPDATE discount_usage \
         SET current_uses = current_uses + 1 \
         WHERE discount_id = ? AND (max_uses IS NULL OR current_uses < max_uses) \
         RETURNING max_uses, current_uses",
    )
    .bind::<Text, _>(discount_id)
    .load(conn)?;

    if let Some(row) = rows.into_iter().next() {
        return usage_from_columns(discount_id, row.max_uses, row.current_uses);
    }

    let registered: bool = diesel::select(diesel::dsl::exists(
        discount_usage::table.filter(discount_usage::discount_id.eq(discount_id)),
    ))
    .get_result(conn)?;

    if registered {
        warn!(discount_id, "Usage limit reached");
        Err(PersistenceError::UsageLimitReached {
            discount_id: discount_id.to_string(),
        })
    } else {
        Err(PersistenceError::DiscountNotRegistered(
            discount_id.to_string(),
        ))
    }
}
