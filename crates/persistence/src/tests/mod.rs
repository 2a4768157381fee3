// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use innkeep_audit::{Actor, Cause};
use innkeep_domain::{Discount, UsageLimit};
use rust_decimal::Decimal;

use crate::SqlitePersistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("desk-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::booking("BK-1001")
}

pub fn create_test_ledger() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory ledger")
}

/// A 10% discount with id `id` and the given cap.
pub fn create_capped_discount(id: &str, max_uses: u32, current_uses: u32) -> Discount {
    Discount::percentage(id, Decimal::from(10))
        .with_id(id)
        .with_usage_limit(UsageLimit::capped(max_uses, current_uses))
}

pub fn create_uncapped_discount(id: &str) -> Discount {
    Discount::percentage(id, Decimal::from(10)).with_id(id)
}
