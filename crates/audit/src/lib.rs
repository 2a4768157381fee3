// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit records for discount redemptions.
//!
//! Every committed redemption produces exactly one `AuditEvent` per
//! discount, capturing who redeemed it, for which booking, and the usage
//! counter before and after the commit.

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

#[cfg(test)]
mod tests;

use innkeep_domain::UsageLimit;
use serde::{Deserialize, Serialize};

/// Action name recorded when a discount redemption is committed.
pub const RECORD_DISCOUNT_USAGE: &str = "RecordDiscountUsage";

/// The entity performing an action.
///
/// Usually a front-desk operator or the booking workflow itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "booking-service").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The reason an action was taken, normally the booking being priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Identifier of the trigger (e.g., booking reference).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }

    /// Creates a cause for a booking reference.
    #[must_use]
    pub fn booking(reference: &str) -> Self {
        Self::new(reference.to_string(), format!("Booking {reference}"))
    }
}

/// The state change that was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`RecordDiscountUsage`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }

    /// Creates the action for a committed redemption of `discount_name`.
    #[must_use]
    pub fn record_usage(discount_name: &str) -> Self {
        Self::new(
            String::from(RECORD_DISCOUNT_USAGE),
            Some(format!("Redeemed '{discount_name}'")),
        )
    }
}

/// The usage counter of a discount at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Rendered counter, e.g. `current_uses=3,max_uses=5`.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Renders a usage counter.
    ///
    /// An uncapped limit is rendered as `max_uses=none`.
    #[must_use]
    pub fn usage(limit: &UsageLimit) -> Self {
        let max: String = limit
            .max_uses
            .map_or_else(|| String::from("none"), |max| max.to_string());
        Self::new(format!(
            "current_uses={},max_uses={max}",
            limit.current_uses
        ))
    }
}

/// An immutable record of one committed redemption.
///
/// The event is scoped to a single discount: a booking that redeems two
/// discounts produces two events sharing the same actor and cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Storage identifier, `None` until the event is persisted.
    pub event_id: Option<i64>,
    /// The discount whose counter changed.
    pub discount_id: String,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The counter before the transition.
    pub before: StateSnapshot,
    /// The counter after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `discount_id` - The discount whose counter changed
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        discount_id: String,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            discount_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event with its storage identifier set.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
