// ============================================================================
// Decimal Normalizer
// Plain fixed-point rendering of f64 values, never scientific notation
// ============================================================================

use super::errors::{NumericError, NumericResult};

/// Render a finite value as a plain decimal string.
///
/// The number of fractional digits is taken from the shortest round-trip
/// scientific rendering: `max(0, significand_fraction_len - exponent)`.
///
/// # Examples
/// - `1e-8` -> `"0.00000001"`
/// - `123.45` -> `"123.45"`
/// - `-2.5e-7` -> `"-0.00000025"`
/// - `1e21` -> `"1000000000000000000000"`
///
/// # Errors
/// Returns `NonFinite` for NaN and infinities.
pub fn to_plain_string(value: f64) -> NumericResult<String> {
    let places = fraction_places(value)?;
    Ok(format!("{:.*}", places, value))
}

/// Number of fractional digits the plain rendering of `value` carries.
///
/// # Errors
/// Returns `NonFinite` for NaN and infinities.
pub fn fraction_places(value: f64) -> NumericResult<usize> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e2"
    let scientific = format!("{:e}", value);
    let (significand, exponent) = scientific
        .split_once('e')
        .ok_or_else(|| NumericError::InvalidOperand(scientific.clone()))?;
    let exponent: i64 = exponent
        .parse()
        .map_err(|_| NumericError::InvalidOperand(scientific.clone()))?;

    let fraction_len = significand
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len()) as i64;

    Ok((fraction_len - exponent).max(0) as usize)
}

/// Count the digits after the decimal point of an already plain string.
pub fn count_fraction_digits(plain: &str) -> usize {
    plain
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}
