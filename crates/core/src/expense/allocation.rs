//! Residue distribution using the Largest Remainder Method.
//!
//! Used only when the residue policy is `Distribute`. The shares it produces
//! sum exactly to the expense amount rounded to the currency's precision.
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact shares
//! 2. Round each share toward zero
//! 3. Calculate the residue (total - sum of rounded)
//! 4. Hand one minimal unit to each share with the largest fractional part,
//!    ties going to the participant first in id order

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use tripsettle_shared::types::minimal_unit;

/// Number of whole minimal units in `residue`, zero if negative.
fn units_in(residue: Decimal, unit: Decimal) -> usize {
    let units = (residue / unit)
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u64()
        .unwrap_or(0);
    usize::try_from(units).unwrap_or(0)
}

/// Sum of the weights, `None` if it overflows.
#[must_use]
pub fn total_weight<'a>(weights: impl IntoIterator<Item = &'a Decimal>) -> Option<Decimal> {
    weights
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
}

/// Exact `amount * weight / total_weight`.
///
/// Falls back to `amount * (weight / total_weight)` when the product
/// overflows. With `0 <= weight <= total_weight` the fallback cannot
/// overflow.
#[must_use]
pub fn proportional_share(amount: Decimal, weight: Decimal, total_weight: Decimal) -> Decimal {
    amount
        .checked_mul(weight)
        .and_then(|product| product.checked_div(total_weight))
        .unwrap_or_else(|| amount * (weight / total_weight))
}

/// Allocate `total` equally across `count` participants.
///
/// The first participants (in the caller's order) receive one extra minimal
/// unit until the residue is used up.
///
/// # Example
///
/// ```
/// use rust_decimal::RoundingStrategy;
/// use rust_decimal_macros::dec;
/// use tripsettle_core::expense::allocation::allocate_equal;
///
/// let shares = allocate_equal(dec!(100), 3, 2, RoundingStrategy::MidpointNearestEven);
/// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn allocate_equal(
    total: Decimal,
    count: usize,
    decimal_places: u32,
    strategy: RoundingStrategy,
) -> Vec<Decimal> {
    if count == 0 {
        return vec![];
    }

    let count_dec = Decimal::from(count);
    let unit = minimal_unit(decimal_places);
    let total_rounded = total.round_dp_with_strategy(decimal_places, strategy);

    let base = (total_rounded / count_dec)
        .round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
    let extra_count = units_in(total_rounded - base * count_dec, unit);

    (0..count)
        .map(|i| if i < extra_count { base + unit } else { base })
        .collect()
}

/// Allocate `total` proportionally to `weights`.
///
/// Returns an empty vector when the weights are empty, do not sum to a
/// positive total, or sum past `Decimal::MAX`.
///
/// # Example
///
/// ```
/// use rust_decimal::RoundingStrategy;
/// use rust_decimal_macros::dec;
/// use tripsettle_core::expense::allocation::allocate_by_weights;
///
/// let shares = allocate_by_weights(
///     dec!(10),
///     &[dec!(1), dec!(1), dec!(1)],
///     2,
///     RoundingStrategy::MidpointNearestEven,
/// );
/// assert_eq!(shares.iter().sum::<rust_decimal::Decimal>(), dec!(10));
/// ```
#[must_use]
pub fn allocate_by_weights(
    total: Decimal,
    weights: &[Decimal],
    decimal_places: u32,
    strategy: RoundingStrategy,
) -> Vec<Decimal> {
    let Some(weight_sum) = total_weight(weights) else {
        return vec![];
    };
    if weights.is_empty() || weight_sum <= Decimal::ZERO {
        return vec![];
    }

    let unit = minimal_unit(decimal_places);
    let total_rounded = total.round_dp_with_strategy(decimal_places, strategy);

    let exact: Vec<Decimal> = weights
        .iter()
        .map(|w| proportional_share(total_rounded, *w, weight_sum))
        .collect();

    let mut rounded: Vec<Decimal> = exact
        .iter()
        .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
        .collect();

    let sum_rounded: Decimal = rounded.iter().copied().sum();
    let units_to_distribute = units_in(total_rounded - sum_rounded, unit);
    if units_to_distribute == 0 {
        return rounded;
    }

    let mut remainders: Vec<(usize, Decimal)> = exact
        .iter()
        .zip(rounded.iter())
        .enumerate()
        .map(|(i, (e, r))| (i, *e - *r))
        .collect();

    // Stable sort keeps caller order among equal remainders.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));

    for (idx, _) in remainders.iter().take(units_to_distribute) {
        rounded[*idx] += unit;
    }

    rounded
}
