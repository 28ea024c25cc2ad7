//! Money calculation boundary using rust_decimal for precision
//!
//! Every monetary computation in the engine runs on `Decimal`; `f64`
//! exists only at the serde/API boundary. Values convert in through
//! [`to_decimal`] and out through [`to_f64`], which rounds to 2 decimal
//! places half-away-from-zero.

use rust_decimal::prelude::*;

/// Rounding for monetary outputs (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Tolerance for share-percentage sums (±0.01 percent points), absorbing
/// the rounding residue of equal-split division
pub const SHARE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Subtotal drift allowed per receipt item. Scaled by item count before
/// comparison: more items, more accumulated rounding slack.
pub const ITEM_TOLERANCE_PER_ITEM: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Per-item split drift allowed per assignee. A 2-decimal percentage
/// share drifts up to ~half a cent per person, so the acceptable total
/// drift grows with the number of people sharing the line.
pub const TOLERANCE_PER_PERSON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Exactly one hundred, the full-assignment share sum.
pub const FULL_SHARE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Convert f64 to Decimal for calculation.
///
/// Inputs come from OCR output or hand-edited values; NaN/Infinity is
/// logged and treated as zero rather than poisoning the calculation.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for output, rounded to 2 decimal places.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round a Decimal to 2 places without leaving the decimal domain.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality (within 0.01 tolerance).
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}
