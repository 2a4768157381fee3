// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

// Mirrors migrations/2026-01-10-000000_create_usage_ledger.

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        discount_id -> Text,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::table! {
    discount_usage (discount_id) {
        discount_id -> Text,
        max_uses -> Nullable<Integer>,
        current_uses -> Integer,
        registered_at -> Nullable<Text>,
    }
}

diesel::joinable!(audit_events -> discount_usage (discount_id));

diesel::allow_tables_to_appear_in_same_query!(audit_events, discount_usage);
