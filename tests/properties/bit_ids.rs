//! Property tests for BitIds set semantics.

use proptest::prelude::*;

use bitpm::domain::value_objects::BitIds;

use super::bit_id::bit_id;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a set never holds two ids with the same canonical string.
    #[test]
    fn property_no_duplicate_canonical_ids(ids in proptest::collection::vec(bit_id(), 0..16)) {
        let mut set = BitIds::new();
        for id in ids.iter().cloned() {
            set.add(id.clone());
            set.add(id);
        }

        let mut rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        let len = rendered.len();
        rendered.sort();
        rendered.dedup();
        prop_assert_eq!(rendered.len(), len);
        prop_assert!(ids.iter().all(|id| set.contains(id)));
    }

    /// PROPERTY: the plain mapping rebuilds an equal set.
    #[test]
    fn property_plain_mapping_round_trips(ids in proptest::collection::vec(bit_id(), 0..16)) {
        let set: BitIds = ids.into_iter().collect();
        let rebuilt = BitIds::from_plain_mapping(&set.to_plain_mapping()).unwrap();
        prop_assert_eq!(rebuilt, set);
    }
}
