//! Percentage application on minor-unit amounts.
//!
//! CRITICAL: Rounding strategy for tips:
//! - Always round to the currency's minor unit
//! - Use round half up (half away from zero on non-negative amounts)
//! - Compute in `Decimal`, never floating point

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Applies `percent` to an amount in minor units, rounding half up to a whole minor unit.
///
/// Returns `None` if the result does not fit in `i64`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use billsplit_core::currency::percent_of_minor;
///
/// // 15% of 10.05 = 1.5075 -> 1.51
/// assert_eq!(percent_of_minor(1005, dec!(15)), Some(151));
/// ```
#[must_use]
pub fn percent_of_minor(amount_minor: i64, percent: Decimal) -> Option<i64> {
    Decimal::from(amount_minor)
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
