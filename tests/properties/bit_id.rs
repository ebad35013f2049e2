//! Property tests for BitId parsing and rendering.

use proptest::prelude::*;

use bitpm::domain::value_objects::BitId;

pub fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_.-]{1,12}").unwrap()
}

pub fn bit_id() -> impl Strategy<Value = BitId> {
    (
        proptest::option::of(segment()),
        segment(),
        segment(),
        proptest::option::of(1u32..1000),
    )
        .prop_map(|(scope, box_name, name, version)| {
            let version = version.map(|v| v.to_string());
            BitId::new(scope.as_deref(), &box_name, &name, version.as_deref()).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: rendering then parsing yields an equal id.
    #[test]
    fn property_bit_id_round_trips_through_string(id in bit_id()) {
        let parsed = BitId::parse(&id.to_string()).unwrap();
        prop_assert_eq!(&parsed, &id);
        prop_assert_eq!(parsed.to_string(), id.to_string());
    }

    /// PROPERTY: equal canonical strings mean equal ids, and vice versa.
    #[test]
    fn property_equality_matches_canonical_string(a in bit_id(), b in bit_id()) {
        prop_assert_eq!(a == b, a.to_string() == b.to_string());
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,64}") {
        let _ = BitId::parse(&input);
        let _ = BitId::parse_plugin(&input);
    }

    /// PROPERTY: the versionless rendering is a prefix of the full one.
    #[test]
    fn property_without_version_is_prefix(id in bit_id()) {
        let full = id.to_string();
        let bare = id.to_string_without_version();
        prop_assert!(full.starts_with(&bare));
        prop_assert_eq!(full.len() == bare.len(), id.version().is_none());
    }
}
