#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Property-based tests for permission evaluation.

use proptest::prelude::*;
use resolver_guard_policy::*;

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Read), Just(Action::Write), Just(Action::Delete)]
}

fn action_set() -> impl Strategy<Value = ActionSet> {
    (0u8..8).prop_map(|bits| {
        Action::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, a)| a)
            .collect()
    })
}

fn resource() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

fn scoped_set() -> impl Strategy<Value = PermissionSet> {
    prop::collection::hash_map(resource(), action_set(), 0..8).prop_map(|grants| {
        let mut set = PermissionSet::new();
        for (name, actions) in grants {
            set.insert(Permission::scoped(name, actions)).unwrap();
        }
        set
    })
}

proptest! {
    #[test]
    fn full_access_allows_every_request(
        permissions in scoped_set(),
        resource in resource(),
        action in action(),
    ) {
        let permissions = permissions.with(Permission::FullAccess).unwrap();
        let request = AccessRequest::new(resource, action);
        prop_assert_eq!(evaluate(&permissions, &request).unwrap(), Decision::Allow);
    }

    #[test]
    fn missing_resource_denies_with_no_grant(
        permissions in scoped_set(),
        resource in resource(),
        action in action(),
    ) {
        prop_assume!(permissions.get(&resource).is_none());
        let request = AccessRequest::new(resource, action);
        prop_assert_eq!(
            evaluate(&permissions, &request).unwrap(),
            Decision::Deny(DenyReason::NoGrantForResource)
        );
    }

    #[test]
    fn decision_follows_granted_actions(
        permissions in scoped_set(),
        resource in resource(),
        granted in action_set(),
        action in action(),
    ) {
        let mut permissions = permissions;
        if permissions.get(&resource).is_none() {
            permissions.insert(Permission::scoped(resource.clone(), granted)).unwrap();
        }
        let expected = if permissions.get(&resource).unwrap().actions.contains(action) {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::ActionNotGranted)
        };

        let request = AccessRequest::new(resource, action);
        prop_assert_eq!(evaluate(&permissions, &request).unwrap(), expected);
    }

    #[test]
    fn evaluation_is_repeatable(
        permissions in scoped_set(),
        resource in resource(),
        action in action(),
    ) {
        let request = AccessRequest::new(resource, action);
        let evaluator = PermissionEvaluator::new();
        let first = evaluator.evaluate(&permissions, &request).unwrap();
        for _ in 0..4 {
            prop_assert_eq!(evaluator.evaluate(&permissions, &request).unwrap(), first);
        }
    }

    #[test]
    fn unknown_action_text_never_parses(text in "[a-z]{2,10}") {
        prop_assume!(!matches!(text.as_str(), "read" | "write" | "delete"));
        let is_unknown = matches!(
            AccessRequest::parse("cars", &text),
            Err(PolicyError::UnknownAction(_))
        );
        prop_assert!(is_unknown);
    }

    #[test]
    fn rwd_code_survives_canonicalisation(set in action_set()) {
        prop_assert_eq!(ActionSet::from_rwd(&set.to_rwd()).unwrap(), set);
    }
}

#[test]
fn scenarios_from_resolver_tutorial() {
    let rw = PermissionSet::from_records(vec![PermissionRecord {
        name: "car-manufacturers".into(),
        rwd: Some("rw".into()),
        locales: None,
    }])
    .unwrap();
    let read = AccessRequest::parse("car-manufacturers", "read").unwrap();
    assert_eq!(evaluate(&rw, &read).unwrap(), Decision::Allow);

    let w = PermissionSet::from_records(vec![PermissionRecord {
        name: "car-manufacturers".into(),
        rwd: Some("w".into()),
        locales: None,
    }])
    .unwrap();
    assert_eq!(
        evaluate(&w, &read).unwrap(),
        Decision::Deny(DenyReason::ActionNotGranted)
    );

    assert_eq!(
        evaluate(&PermissionSet::new(), &read).unwrap(),
        Decision::Deny(DenyReason::NoGrantForResource)
    );

    let admin = PermissionSet::from_records(vec![PermissionRecord {
        name: "*".into(),
        ..Default::default()
    }])
    .unwrap();
    let delete = AccessRequest::new("anything", Action::Delete);
    assert_eq!(evaluate(&admin, &delete).unwrap(), Decision::Allow);
}
