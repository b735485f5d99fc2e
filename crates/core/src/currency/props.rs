//! Property-based tests for allocation and rounding.
//!
//! - Apportionment sum invariant
//! - Apportionment stays within one unit of the exact share
//! - Equal allocation is balanced and front-loaded
//! - Percentage rounding is bounded

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::AllocationUtil;
use super::rounding::percent_of_minor;

/// Strategy to generate signed totals in minor units (up to 12 digits).
fn any_total() -> impl Strategy<Value = i64> {
    -999_999_999_999i64..=999_999_999_999i64
}

/// Strategy to generate weight vectors with at least one recipient.
fn weights() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000_000_000_000, 1..20)
}

/// Strategy to generate percentages with two decimal places (0.00 to 999.99).
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|bp| Decimal::new(bp, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* total and weights, the shares SHALL sum exactly to the total.
    #[test]
    fn prop_apportion_sum_invariant(total in any_total(), weights in weights()) {
        let shares = AllocationUtil::apportion(total, &weights);
        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().sum::<i64>(), total);
    }

    /// *For any* non-degenerate weights, each share SHALL be within one unit of
    /// its exact proportional value and carry the sign of the total.
    #[test]
    fn prop_apportion_within_one_unit(total in any_total(), weights in weights()) {
        let weight_sum: i128 = weights.iter().map(|w| i128::from(*w)).sum();
        prop_assume!(weight_sum > 0);

        let shares = AllocationUtil::apportion(total, &weights);
        for (share, weight) in shares.iter().zip(&weights) {
            // |share * W - total * w| < W
            let scaled_share = i128::from(*share) * weight_sum;
            let exact = i128::from(total) * i128::from(*weight);
            prop_assert!((scaled_share - exact).abs() < weight_sum);
            prop_assert!(i128::from(*share) * i128::from(total.signum()) >= 0);
        }
    }

    /// *For any* weights, a zero-weight recipient SHALL receive nothing unless
    /// all weights are zero.
    #[test]
    fn prop_apportion_zero_weight_receives_nothing(total in any_total(), weights in weights()) {
        prop_assume!(weights.iter().any(|w| *w > 0));
        let shares = AllocationUtil::apportion(total, &weights);
        for (share, weight) in shares.iter().zip(&weights) {
            if *weight == 0 {
                prop_assert_eq!(*share, 0);
            }
        }
    }

    /// Calling apportion twice with the same inputs SHALL give the same result.
    #[test]
    fn prop_apportion_is_deterministic(total in any_total(), weights in weights()) {
        prop_assert_eq!(
            AllocationUtil::apportion(total, &weights),
            AllocationUtil::apportion(total, &weights)
        );
    }

    /// *For any* total and count, equal shares SHALL differ by at most one
    /// unit, with larger magnitudes first.
    #[test]
    fn prop_allocate_equal_balanced(total in any_total(), count in 1usize..50) {
        let shares = AllocationUtil::allocate_equal(total, count);
        prop_assert_eq!(shares.iter().sum::<i64>(), total);
        for pair in shares.windows(2) {
            prop_assert!(pair[0].abs() >= pair[1].abs());
            prop_assert!(pair[0].abs() - pair[1].abs() <= 1);
        }
    }

    /// Equal weights SHALL apportion exactly like an equal split.
    #[test]
    fn prop_equal_weights_match_equal_split(
        total in any_total(),
        count in 1usize..50,
        weight in 1u64..1000,
    ) {
        prop_assert_eq!(
            AllocationUtil::apportion(total, &vec![weight; count]),
            AllocationUtil::allocate_equal(total, count)
        );
    }

    /// *For any* amount and percentage, the rounded result SHALL be within half
    /// a minor unit of the exact value.
    #[test]
    fn prop_percent_within_half_unit(amount in 0i64..=999_999_999_999, pct in percent()) {
        let result = percent_of_minor(amount, pct);
        prop_assert!(result.is_some());
        let exact = Decimal::from(amount) * pct / Decimal::ONE_HUNDRED;
        let diff = (Decimal::from(result.unwrap_or_default()) - exact).abs();
        prop_assert!(diff <= Decimal::new(5, 1));
    }
}
