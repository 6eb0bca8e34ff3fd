//! Property tests for fragment merging.

use proptest::prelude::*;
use serde_json::{Map, Value};

use score_compose::domain::services::{merge_maps, merge_patch};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..4).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        // A small key alphabet makes collisions between sides likely.
        proptest::collection::btree_map("[a-d]", inner, 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    })
}

fn mapping() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map("[a-d]", value(), 0..5).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: merging a mapping with itself yields the same mapping.
    #[test]
    fn property_merge_is_idempotent(a in mapping()) {
        prop_assert_eq!(merge_maps(&a, &a, "root"), Ok(a.clone()));
    }

    /// PROPERTY: the empty mapping is an identity on both sides.
    #[test]
    fn property_empty_is_identity(a in mapping()) {
        let empty = Map::new();
        prop_assert_eq!(merge_maps(&a, &empty, "root"), Ok(a.clone()));
        prop_assert_eq!(merge_maps(&empty, &a, "root"), Ok(a.clone()));
    }

    /// PROPERTY: the outcome does not depend on argument order.
    #[test]
    fn property_merge_is_commutative(a in mapping(), b in mapping()) {
        let ab = merge_maps(&a, &b, "root");
        let ba = merge_maps(&b, &a, "root");
        match (ab, ba) {
            (Ok(ab), Ok(ba)) => prop_assert_eq!(ab, ba),
            (Err(x), Err(y)) => {
                prop_assert!(x.path.starts_with("root."));
                prop_assert!(y.path.starts_with("root."));
            }
            (ab, ba) => prop_assert!(false, "asymmetric outcome: {:?} vs {:?}", ab, ba),
        }
    }

    /// PROPERTY: every key of both inputs survives a successful merge.
    #[test]
    fn property_merge_keeps_all_keys(a in mapping(), b in mapping()) {
        if let Ok(merged) = merge_maps(&a, &b, "root") {
            for key in a.keys().chain(b.keys()) {
                prop_assert!(merged.contains_key(key));
            }
        }
    }

    /// PROPERTY: applying the same merge patch twice changes nothing more.
    #[test]
    fn property_merge_patch_is_idempotent(target in mapping(), patch in mapping()) {
        let mut once = target.clone();
        merge_patch(&mut once, &patch);
        let mut twice = once.clone();
        merge_patch(&mut twice, &patch);
        prop_assert_eq!(once, twice);
    }
}
