// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use innkeep_audit::AuditEvent;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    Ok(AuditEvent::new(
        row.discount_id,
        serde_json::from_str(&row.actor_json)?,
        serde_json::from_str(&row.cause_json)?,
        serde_json::from_str(&row.action_json)?,
        serde_json::from_str(&row.before_snapshot_json)?,
        serde_json::from_str(&row.after_snapshot_json)?,
    )
    .with_event_id(row.event_id))
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if there is no such event, or an
/// error if a stored column cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;

    event_from_row(row)
}

/// Retrieves every audit event of a discount in commit order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored column cannot be
/// deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    discount_id: &str,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::discount_id.eq(discount_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(event_from_row)
        .collect()
}
