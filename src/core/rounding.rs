//! Decimal rounding for grade percentages
//!
//! Values are rounded through their shortest decimal representation rather
//! than their binary one, so `93.825` rounds half-up to `93.83`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places every computed grade is rounded to
pub const GRADE_PLACES: i32 = 2;

/// Round `value` half-up (midpoint away from zero) to `places` decimal digits.
///
/// # Errors
///
/// Returns an error if `places` is negative, if `value` is NaN or infinite, or
/// if it lies outside the range a 96-bit decimal can hold.
pub fn round(value: f64, places: i32) -> Result<f64, String> {
    let places = u32::try_from(places)
        .map_err(|_| format!("Decimal places must be non-negative, got {places}"))?;

    if !value.is_finite() {
        return Err(format!("Cannot round non-finite value {value}"));
    }

    let decimal = Decimal::from_str(&value.to_string())
        .or_else(|_| Decimal::try_from(value))
        .map_err(|e| format!("Cannot represent {value} as a decimal: {e}"))?;

    decimal
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .ok_or_else(|| format!("Rounded value of {value} does not fit in f64"))
}

/// Round a grade to [`GRADE_PLACES`].
///
/// # Errors
///
/// Returns an error under the same conditions as [`round`].
pub fn round_grade(value: f64) -> Result<f64, String> {
    round(value, GRADE_PLACES)
}
