// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, RECORD_DISCOUNT_USAGE, StateSnapshot};
use innkeep_domain::UsageLimit;

fn create_test_event() -> AuditEvent {
    AuditEvent::new(
        String::from("spring-10"),
        Actor::new(String::from("desk-1"), String::from("operator")),
        Cause::booking("BK-1001"),
        Action::record_usage("Spring"),
        StateSnapshot::usage(&UsageLimit::capped(5, 2)),
        StateSnapshot::usage(&UsageLimit::capped(5, 3)),
    )
}

#[test]
fn test_booking_cause() {
    let cause: Cause = Cause::booking("BK-1001");

    assert_eq!(cause.id, "BK-1001");
    assert_eq!(cause.description, "Booking BK-1001");
}

#[test]
fn test_record_usage_action() {
    let action: Action = Action::record_usage("Spring");

    assert_eq!(action.name, RECORD_DISCOUNT_USAGE);
    assert_eq!(action.details, Some(String::from("Redeemed 'Spring'")));
}

#[test]
fn test_usage_snapshot_capped() {
    let snapshot: StateSnapshot = StateSnapshot::usage(&UsageLimit::capped(5, 2));

    assert_eq!(snapshot.data, "current_uses=2,max_uses=5");
}

#[test]
fn test_usage_snapshot_uncapped() {
    let limit: UsageLimit = UsageLimit {
        max_uses: None,
        current_uses: 7,
    };

    assert_eq!(
        StateSnapshot::usage(&limit).data,
        "current_uses=7,max_uses=none"
    );
}

#[test]
fn test_new_event_is_unpersisted() {
    let event: AuditEvent = create_test_event();

    assert_eq!(event.event_id, None);
    assert_eq!(event.discount_id, "spring-10");
    assert_eq!(event.actor.id, "desk-1");
    assert_eq!(event.before.data, "current_uses=2,max_uses=5");
    assert_eq!(event.after.data, "current_uses=3,max_uses=5");
}

#[test]
fn test_with_event_id() {
    let event: AuditEvent = create_test_event().with_event_id(42);

    assert_eq!(event.event_id, Some(42));
}

#[test]
fn test_actor_equality() {
    let actor1: Actor = Actor::new(String::from("desk-1"), String::from("operator"));
    let actor2: Actor = Actor::new(String::from("desk-1"), String::from("operator"));
    let actor3: Actor = Actor::new(String::from("desk-2"), String::from("operator"));

    assert_eq!(actor1, actor2);
    assert_ne!(actor1, actor3);
}

#[test]
fn test_actor_json_shape() {
    let actor: Actor = Actor::new(String::from("desk-1"), String::from("operator"));

    let json: String = serde_json::to_string(&actor).unwrap();

    assert_eq!(json, r#"{"id":"desk-1","actor_type":"operator"}"#);
    assert_eq!(serde_json::from_str::<Actor>(&json).unwrap(), actor);
}
