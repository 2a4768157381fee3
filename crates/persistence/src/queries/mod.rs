// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only ledger queries.

pub mod audit;
pub mod usage;

pub use audit::{get_audit_event, get_audit_timeline};
pub use usage::{get_usage, list_usage};
