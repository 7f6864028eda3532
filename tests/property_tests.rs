//! Property-based tests for the introspection views
//!
//! These tests use proptest to check that names, map and single lookups stay consistent for arbitrary property
//! tables, including duplicate names, unknown encodings and ancestor chains.

use proptest::prelude::*;

use propmap::encoding;
use propmap::{Inheritance, IntrospectConfig, PropertyIntrospector, TypeHandle, TypeInfo, TypeRegistry};

// =============================================================================
// Strategies
// =============================================================================

fn property_name() -> impl Strategy<Value = String> {
    // Small alphabet so duplicate declarations show up often.
    prop::sample::select(vec!["id", "name", "age", "origin", "tags", "x", "y"]).prop_map(str::to_string)
}

fn signature() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "c", "C", "s", "S", "i", "I", "l", "L", "q", "Q", "f", "d", "B", "*", "^i", "^v", "@",
        ])
        .prop_map(str::to_string),
        "[A-Z][a-zA-Z]{0,8}".prop_map(|class| format!("@\"{class}\"")),
        prop::sample::select(vec!["{CGPoint=dd}", "[4i]", "(U=if)", "b3", "v", "#", ":", "^?", "@?", "?"])
            .prop_map(str::to_string),
        // Arbitrary junk must degrade, never fail.
        ".{0,6}",
        "[a-z]".prop_map(|enc| format!("T{enc},N,V_ivar")),
    ]
}

/// Long runs of pointer and group openers with a short tail, to exercise nesting depth.
fn deep_encoding() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[\\^{\\[(]", 0..20_000),
        prop::sample::select(vec!["", "i", "?", "@\"Name\"", "}", "]", ")", "=i}"]),
        0usize..20_000,
    )
        .prop_map(|(openers, tail, closers)| {
            let closing: String = openers
                .iter()
                .rev()
                .take(closers)
                .filter_map(|opener| match opener.as_str() {
                    "{" => Some('}'),
                    "[" => Some(']'),
                    "(" => Some(')'),
                    _ => None,
                })
                .collect();
            format!("{}{tail}{closing}", openers.concat())
        })
}

fn properties() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((property_name(), signature()), 0..12)
}

fn build(name: &'static str, parent: Option<&'static str>, props: &[(String, String)]) -> TypeInfo {
    let mut info = TypeInfo::new(name);
    if let Some(parent) = parent {
        info = info.extends(parent);
    }
    props
        .iter()
        .fold(info, |info, (name, sig)| info.property(name.clone(), sig.clone()))
}

fn registry(parent_props: &[(String, String)], child_props: &[(String, String)]) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register_info(build("Parent", None, parent_props))
        .unwrap()
        .register_info(build("Child", Some("Parent"), child_props))
        .unwrap();
    registry
}

fn check_views(introspector: &PropertyIntrospector<'_>, handle: &TypeHandle) -> Result<(), TestCaseError> {
    let names = introspector.property_names(handle).unwrap();
    let map = introspector.property_type_map(handle).unwrap();

    // Same properties, same order.
    prop_assert_eq!(map.keys().cloned().collect::<Vec<_>>(), names.clone());

    // Single lookup agrees with the map.
    for name in &names {
        prop_assert_eq!(&introspector.property_type(name, handle).unwrap(), &map[name.as_str()]);
    }
    Ok(())
}

proptest! {
    /// Property: names and map describe the same properties, and lookups agree with the map.
    #[test]
    fn views_are_consistent_declared_only(parent in properties(), child in properties()) {
        let registry = registry(&parent, &child);
        let introspector = PropertyIntrospector::new(&registry);
        check_views(&introspector, &TypeHandle::named("Child"))?;
        check_views(&introspector, &TypeHandle::named("Parent"))?;
    }

    /// Property: the same holds when ancestors are included.
    #[test]
    fn views_are_consistent_with_ancestors(parent in properties(), child in properties()) {
        let registry = registry(&parent, &child);
        let introspector = PropertyIntrospector::with_config(
            &registry,
            IntrospectConfig::new().with_inheritance(Inheritance::IncludeAncestors),
        );
        check_views(&introspector, &TypeHandle::named("Child"))?;
    }

    /// Property: names are the distinct declared names in first-declaration order; the map holds the last
    /// declaration's label.
    #[test]
    fn duplicates_keep_first_position_and_last_type(props in properties()) {
        let registry = registry(&[], &props);
        let introspector = PropertyIntrospector::new(&registry);
        let child = TypeHandle::named("Child");

        let mut expected_names: Vec<String> = Vec::new();
        for (name, _) in &props {
            if !expected_names.contains(name) {
                expected_names.push(name.clone());
            }
        }
        prop_assert_eq!(introspector.property_names(&child).unwrap(), expected_names);

        let map = introspector.property_type_map(&child).unwrap();
        for (name, label) in &map {
            let (_, last_sig) = props.iter().rev().find(|(n, _)| n == name).unwrap();
            let encoding = propmap::attributes::property_encoding(last_sig);
            let expected = encoding::normalize(encoding);
            prop_assert_eq!(label.as_str(), expected.label());
        }
    }

    /// Property: an undeclared name is always PropertyNotFound, whatever the table holds.
    #[test]
    fn undeclared_names_are_not_found(props in properties()) {
        let registry = registry(&[], &props);
        let introspector = PropertyIntrospector::new(&registry);
        let result = introspector.property_type("doesNotExist", &TypeHandle::named("Child"));
        prop_assert!(matches!(result, Err(propmap::IntrospectError::PropertyNotFound { .. })), "expected PropertyNotFound error");
    }

    /// Property: normalization never panics and degrades only to the sentinel.
    #[test]
    fn normalization_is_total(encoding in ".{0,16}") {
        let normalized = encoding::normalize(&encoding);
        let shape = encoding::shape(&encoding);
        prop_assert_eq!(normalized.is_recognized(), shape.is_recognized());
    }

    /// Property: deeply nested or long pointer encodings still normalize, and only their own entry degrades.
    #[test]
    fn deep_encodings_degrade_without_failing(encoding in deep_encoding()) {
        let normalized = encoding::normalize(&encoding);
        prop_assert_eq!(normalized.is_recognized(), encoding::shape(&encoding).is_recognized());
        if encoding.starts_with('^') && !encoding.starts_with("^?") && normalized.is_recognized() {
            prop_assert_eq!(normalized.label(), "pointer");
        }

        let mut registry = TypeRegistry::new();
        registry
            .register_info(TypeInfo::new("Deep").property("nested", encoding.clone()).property("age", "i"))
            .unwrap();
        let map = PropertyIntrospector::new(&registry).property_type_map(&TypeHandle::named("Deep")).unwrap();
        prop_assert_eq!(map["nested"].as_str(), normalized.label());
        prop_assert_eq!(map["age"].as_str(), "int");
    }
}
