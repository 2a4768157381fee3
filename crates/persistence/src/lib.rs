// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Discount usage ledger for the innkeep back-office.
//!
//! The evaluator in the `innkeep` crate only reads a discount's usage
//! counter. This crate owns the counter: it commits redemptions with an
//! atomic increment-if-below-limit and records one audit event per
//! redeemed discount.
//!
//! ## Storage
//!
//! The ledger is a `SQLite` database managed through Diesel. Migrations are
//! embedded and applied when a connection is opened.
//!
//! - `new_in_memory()` gives every call its own isolated database, for tests
//! - `new_with_file()` opens a file database in WAL mode; several processes
//!   may share it, and a busy writer is waited on rather than failed
//!
//! ## Redemption
//!
//! `record_usage` commits all discounts of one booking in a single
//! transaction. If any of them is at its cap the whole commit is rolled
//! back and `PersistenceError::UsageLimitReached` names the discount. A
//! caller must expect this even after the evaluator reported the discount
//! as applicable: another booking may have taken the last use in between.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use innkeep_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use innkeep_domain::{Discount, UsageLimit};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{DiscountUsageSummary, UsageReceipt};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The usage ledger, backed by a single `SQLite` connection.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a ledger on a fresh in-memory database.
    ///
    /// Each call receives a unique shared-cache database, so instances
    /// never see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:innkeep_ledger_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens (or creates) a ledger in a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// Registers a usage counter, or updates the cap of an existing one.
    ///
    /// A new counter starts at `limit.current_uses`. An existing counter
    /// keeps its stored value: only `max_uses` is updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn register_discount(
        &mut self,
        discount_id: &str,
        limit: &UsageLimit,
    ) -> Result<(), PersistenceError> {
        mutations::register_usage(&mut self.conn, discount_id, limit)
    }

    /// Registers every persisted discount of a catalogue in one transaction.
    ///
    /// Discounts without an id are skipped.
    ///
    /// # Returns
    ///
    /// The number of discounts registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any registration fails; none are kept then.
    pub fn register_catalogue(
        &mut self,
        discounts: &[Discount],
    ) -> Result<usize, PersistenceError> {
        let count: usize = self.conn.immediate_transaction(|conn| {
            let mut count: usize = 0;
            for discount in discounts {
                if let Some(id) = &discount.id {
                    mutations::register_usage(conn, id, &discount.usage_limit)?;
                    count += 1;
                }
            }
            Ok::<usize, PersistenceError>(count)
        })?;

        info!(count, "Registered discount catalogue");
        Ok(count)
    }

    /// Returns the counter of a discount.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DiscountNotRegistered` if there is none.
    pub fn usage(&mut self, discount_id: &str) -> Result<UsageLimit, PersistenceError> {
        queries::get_usage(&mut self.conn, discount_id)
    }

    /// Returns usage statistics for every registered discount.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn usage_summary(&mut self) -> Result<Vec<DiscountUsageSummary>, PersistenceError> {
        queries::list_usage(&mut self.conn)
    }

    /// Overwrites each discount's usage limit with the ledger's counter.
    ///
    /// The ledger's cap replaces the catalogue's, since it is the one
    /// enforced at commit. Discounts without an id, or without a counter,
    /// are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup fails for any other reason.
    pub fn refresh_usage(&mut self, discounts: &mut [Discount]) -> Result<(), PersistenceError> {
        for discount in discounts.iter_mut() {
            let Some(id) = discount.id.as_deref() else {
                continue;
            };
            match queries::get_usage(&mut self.conn, id) {
                Ok(stored) => discount.usage_limit = stored,
                Err(PersistenceError::DiscountNotRegistered(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Redemption
    // ========================================================================

    /// Commits one redemption of each discount, atomically.
    ///
    /// Unregistered discounts are registered first from their own
    /// `usage_limit`. Each counter is incremented only if it is below its
    /// cap, and one audit event is written per discount. Either every
    /// discount is recorded or none is.
    ///
    /// # Arguments
    ///
    /// * `discounts` - The discounts applied to the booking
    /// * `actor` - Who is committing the booking
    /// * `cause` - The booking being committed
    ///
    /// # Returns
    ///
    /// One receipt per discount, in input order.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::UnpersistedDiscount` if a discount has no id
    ///   (checked before anything is written)
    /// - `PersistenceError::UsageLimitReached` if a discount is at its cap
    pub fn record_usage(
        &mut self,
        discounts: &[&Discount],
        actor: &Actor,
        cause: &Cause,
    ) -> Result<Vec<UsageReceipt>, PersistenceError> {
        let mut ids: Vec<&str> = Vec::with_capacity(discounts.len());
        for discount in discounts {
            let id: &str = discount
                .id
                .as_deref()
                .ok_or_else(|| PersistenceError::UnpersistedDiscount(discount.name.clone()))?;
            ids.push(id);
        }

        let receipts: Vec<UsageReceipt> = self.conn.immediate_transaction(|conn| {
            let mut receipts: Vec<UsageReceipt> = Vec::with_capacity(discounts.len());

            for (discount, id) in discounts.iter().zip(ids.iter().copied()) {
                mutations::seed_usage(conn, id, &discount.usage_limit)?;
                let after: UsageLimit = mutations::increment_usage(conn, id)?;
                let before: UsageLimit = UsageLimit {
                    current_uses: after.current_uses.saturating_sub(1),
                    ..after
                };

                let event: AuditEvent = AuditEvent::new(
                    id.to_string(),
                    actor.clone(),
                    cause.clone(),
                    Action::record_usage(&discount.name),
                    StateSnapshot::usage(&before),
                    StateSnapshot::usage(&after),
                );
                let event_id: i64 = mutations::persist_audit_event(conn, &event)?;

                receipts.push(UsageReceipt {
                    discount_id: id.to_string(),
                    event_id,
                    usage: after,
                });
            }

            Ok::<Vec<UsageReceipt>, PersistenceError>(receipts)
        })?;

        info!(
            cause = %cause.id,
            actor = %actor.id,
            discounts = receipts.len(),
            "Recorded discount usage"
        );
        Ok(receipts)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves every redemption of a discount in commit order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be
    /// deserialized.
    pub fn audit_timeline(
        &mut self,
        discount_id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, discount_id)
    }
}
