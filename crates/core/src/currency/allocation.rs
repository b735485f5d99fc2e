//! Amount allocation utilities using Largest Remainder Method.
//!
//! This module provides functions for allocating integer minor-unit amounts
//! fairly while ensuring the sum exactly equals the original total (no cents
//! lost).
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact proportional allocations as rationals
//! 2. Truncate each allocation toward zero
//! 3. Calculate the leftover (|total| - sum of truncated)
//! 4. Award leftover units to recipients with the largest fractional parts,
//!    earliest recipient first on ties

/// Allocation utility for distributing amounts.
///
/// Uses the Largest Remainder Method to ensure:
/// - Fair distribution of amounts
/// - Sum of allocations EXACTLY equals the original total
/// - The same input always produces the same output
pub struct AllocationUtil;

impl AllocationUtil {
    /// Apportion `total` minor units across recipients weighted by `weights`.
    ///
    /// Negative totals are apportioned by magnitude and negated, so truncation
    /// is always toward zero and leftover units carry the sign of `total`.
    /// When every weight is zero the total is split evenly instead.
    ///
    /// # Returns
    ///
    /// One share per weight, in the same order, where sum == total.
    ///
    /// # Example
    ///
    /// ```
    /// use billsplit_core::currency::AllocationUtil;
    ///
    /// // 100 by 1:2:3 = [16.67, 33.33, 50] -> [17, 33, 50]
    /// let result = AllocationUtil::apportion(100, &[1, 2, 3]);
    /// assert_eq!(result, vec![17, 33, 50]);
    /// ```
    #[must_use]
    pub fn apportion(total: i64, weights: &[u64]) -> Vec<i64> {
        if weights.is_empty() {
            return vec![];
        }

        let weight_sum: u128 = weights.iter().map(|w| u128::from(*w)).sum();
        if weight_sum == 0 {
            return Self::allocate_equal(total, weights.len());
        }

        let magnitude = u128::from(total.unsigned_abs());

        // Floor of each exact share, keeping the numerator remainder. All
        // fractional parts share the denominator `weight_sum`, so comparing
        // numerators compares fractions exactly.
        let mut shares: Vec<u128> = Vec::with_capacity(weights.len());
        let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(weights.len());
        for (idx, weight) in weights.iter().enumerate() {
            let numerator = magnitude * u128::from(*weight);
            shares.push(numerator / weight_sum);
            remainders.push((idx, numerator % weight_sum));
        }

        let allocated: u128 = shares.iter().sum();
        let leftover = usize::try_from(magnitude - allocated).unwrap_or(0);

        if leftover > 0 {
            // Largest remainder first; request order breaks ties
            remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            for (idx, _) in remainders.iter().take(leftover) {
                shares[*idx] += 1;
            }
        }

        shares
            .into_iter()
            .map(|share| Self::signed_share(share, total))
            .collect()
    }

    /// Allocate `total` equally across `count` recipients.
    ///
    /// The first `|total| mod count` recipients absorb one extra unit each.
    ///
    /// # Example
    ///
    /// ```
    /// use billsplit_core::currency::AllocationUtil;
    ///
    /// let result = AllocationUtil::allocate_equal(1000, 3);
    /// assert_eq!(result, vec![334, 333, 333]);
    /// ```
    #[must_use]
    pub fn allocate_equal(total: i64, count: usize) -> Vec<i64> {
        if count == 0 {
            return vec![];
        }

        let magnitude = u128::from(total.unsigned_abs());
        let count_u = count as u128;
        let base = magnitude / count_u;
        let extra = magnitude % count_u;

        (0..count)
            .map(|i| {
                let share = if (i as u128) < extra { base + 1 } else { base };
                Self::signed_share(share, total)
            })
            .collect()
    }

    /// Re-applies the sign of `total` to a share magnitude.
    ///
    /// A share's magnitude never exceeds `|total|`, so the conversion back to
    /// `i64` cannot fail.
    fn signed_share(share: u128, total: i64) -> i64 {
        let signed = i128::try_from(share).unwrap_or(0);
        let signed = if total < 0 { -signed } else { signed };
        i64::try_from(signed).unwrap_or(0)
    }
}
