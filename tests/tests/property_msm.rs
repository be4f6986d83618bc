//! Property-based tests for multi-scalar multiplication

use proptest::prelude::*;
use shercrypto_tests::{g1_instance, naive_g1, test_curve};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn msm_matches_naive_sum(n in 0usize..90, seed in any::<u64>()) {
        let curve = test_curve();
        let (points, scalars) = g1_instance(n, seed);
        let got = curve.multi_exp_sync(&points, &scalars).unwrap();
        prop_assert_eq!(got, naive_g1(&points, &scalars));
    }

    #[test]
    fn msm_rejects_unequal_lengths(n in 1usize..20, drop in 1usize..5) {
        let curve = test_curve();
        let (points, scalars) = g1_instance(n, n as u64);
        let keep = n.saturating_sub(drop);
        prop_assert!(curve.multi_exp(&points, &scalars[..keep]).is_err());
    }
}
