//! Property tests for specs result normalization.

use proptest::prelude::*;

use bitpm::domain::entities::{RawResults, RawStats, RawTest, SpecsResults};

fn raw_test() -> impl Strategy<Value = RawTest> {
    ("[a-z ]{1,16}", any::<bool>()).prop_map(|(title, pass)| RawTest {
        title,
        pass,
        err: None,
        duration: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a run passes exactly when no test failed and no failures were reported.
    #[test]
    fn property_pass_iff_no_failures(
        tests in proptest::collection::vec(raw_test(), 0..12),
        reported in proptest::option::of(0u64..3),
    ) {
        let any_failed = tests.iter().any(|t| !t.pass);
        let results = SpecsResults::create_from_raw(RawResults {
            tests,
            stats: RawStats { failures: reported, ..RawStats::default() },
        });

        prop_assert_eq!(results.pass, !any_failed && reported.unwrap_or(0) == 0);
        prop_assert_eq!(results.failed_tests().count() > 0, any_failed);
    }
}
