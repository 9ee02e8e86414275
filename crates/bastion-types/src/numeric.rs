//! Fixed-point helpers shared by every crate that scales counts.
//!
//! Counts are whole `u32` values. Multipliers are [`Decimal`] and every
//! product is rounded back to a count with [`floor_u32`] or [`ceil_u32`].
//! None of these helpers panic: overflow saturates.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Upper bound of every settlement stat.
pub const STAT_MAX: u32 = 100;

/// Convert an integer percentage to a multiplier (`80` -> `0.80`).
pub fn pct(percent: u32) -> Decimal {
    Decimal::new(i64::from(percent), 2)
}

/// Multiply a count by a multiplier, saturating on overflow.
pub fn scale(count: u32, multiplier: Decimal) -> Decimal {
    Decimal::from(count)
        .checked_mul(multiplier)
        .unwrap_or(Decimal::MAX)
}

/// Multiply two multipliers, saturating on overflow.
pub fn compound(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// Round down to a count. Negative values become zero.
pub fn floor_u32(value: Decimal) -> u32 {
    if value.is_sign_negative() {
        return 0;
    }
    value.floor().to_u32().unwrap_or(u32::MAX)
}

/// Round up to a count. Negative values become zero.
pub fn ceil_u32(value: Decimal) -> u32 {
    if value.is_sign_negative() {
        return 0;
    }
    value.ceil().to_u32().unwrap_or(u32::MAX)
}

/// `numerator / denominator` as a multiplier; a zero denominator yields one.
pub fn ratio(numerator: u32, denominator: u32) -> Decimal {
    if denominator == 0 {
        return Decimal::ONE;
    }
    Decimal::from(numerator)
        .checked_div(Decimal::from(denominator))
        .unwrap_or(Decimal::ONE)
}

/// Integer division rounded up. A zero divisor yields zero.
pub const fn div_ceil(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    value.div_ceil(divisor)
}

/// Apply a signed delta to a stat and clamp the result to `0..=100`.
pub fn shift_stat(current: u32, delta: i32) -> u32 {
    let shifted = i64::from(current).saturating_add(i64::from(delta));
    u32::try_from(shifted.clamp(0, i64::from(STAT_MAX))).unwrap_or(STAT_MAX)
}
