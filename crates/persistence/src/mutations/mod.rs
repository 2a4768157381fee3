// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing ledger operations.
//!
//! - `usage`: counter registration and the conditional increment
//! - `audit`: audit event persistence
//!
//! Functions here take a bare connection and never open transactions; the
//! `SqlitePersistence` adapter decides the transaction boundaries.

pub mod audit;
pub mod usage;

pub use audit::persist_audit_event;
pub use usage::{increment_usage, register_usage, seed_usage};
