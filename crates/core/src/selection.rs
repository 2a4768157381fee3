// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::Discount;

/// Orders applicable discounts by descending priority.
///
/// The sort is stable: equal priorities keep their input order.
pub(crate) fn rank_by_priority(discounts: &mut [&Discount]) {
    discounts.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Picks the discounts that may be applied together from a ranked list.
///
/// The highest-ranked discount is always kept. Each following discount is
/// kept only while it and everything already kept are combinable; the first
/// one that breaks the chain ends the walk, so a non-combinable discount
/// blocks everything ranked below it.
pub(crate) fn resolve_stack(ranked: Vec<&Discount>) -> Vec<&Discount> {
    let mut kept: Vec<&Discount> = Vec::with_capacity(ranked.len());

    for discount in ranked {
        if kept.is_empty() {
            kept.push(discount);
            continue;
        }
        if !discount.combinable || !kept.iter().all(|k| k.combinable) {
            break;
        }
        kept.push(discount);
    }

    kept
}
