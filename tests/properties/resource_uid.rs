//! Property tests for resource instance ids.

use proptest::prelude::*;

use score_compose::domain::value_objects::ResourceUid;

fn name() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9-]{0,10}[a-z0-9])?"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same declaration always yields the same id.
    #[test]
    fn property_ids_are_stable(
        workload in name(),
        local in name(),
        res_type in name(),
        class in proptest::option::of(name()),
    ) {
        let first = ResourceUid::new(&workload, &local, &res_type, class.as_deref());
        let second = ResourceUid::new(&workload, &local, &res_type, class.as_deref());
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: an id splits back into type, class and global name.
    #[test]
    fn property_ids_split_into_parts(
        workload in name(),
        local in name(),
        res_type in name(),
        class in proptest::option::of(name()),
    ) {
        let id = ResourceUid::new(&workload, &local, &res_type, class.as_deref());
        let global = ResourceUid::global_name(&workload, &local);
        let expected_class = class.as_deref().unwrap_or(ResourceUid::DEFAULT_CLASS);
        prop_assert_eq!(
            id.parts(),
            Some((res_type.as_str(), expected_class, global.as_str()))
        );
    }

    /// PROPERTY: a missing class and the explicit default class are the same instance.
    #[test]
    fn property_default_class_is_implicit(
        workload in name(),
        local in name(),
        res_type in name(),
    ) {
        prop_assert_eq!(
            ResourceUid::new(&workload, &local, &res_type, None),
            ResourceUid::new(&workload, &local, &res_type, Some("default"))
        );
    }

    /// PROPERTY: different classes never share an instance.
    #[test]
    fn property_class_changes_identity(
        workload in name(),
        local in name(),
        res_type in name(),
        a in name(),
        b in name(),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(
            ResourceUid::new(&workload, &local, &res_type, Some(&a)),
            ResourceUid::new(&workload, &local, &res_type, Some(&b))
        );
    }
}
