// ============================================================================
// Decimal Value
// Exact mantissa / power-of-ten scale pairs and the f64 decomposer
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::normalizer;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Largest supported number of decimal places (10^38 still fits in i128).
pub const MAX_DECIMALS: u32 = 38;

/// 2^127 as f64; integral values at or beyond this do not fit in i128.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Compute 10^n, failing when it leaves the i128 range.
#[inline]
pub fn pow10(n: u32) -> NumericResult<i128> {
    10_i128.checked_pow(n).ok_or(NumericError::Overflow)
}

/// Exact decimal quantity `mantissa / 10^decimals`.
///
/// The scale is always a power of ten, so of any two values the larger
/// scale is an integer multiple of the smaller one.
///
/// # Example
/// ```
/// use decimal_chain::numeric::DecimalValue;
///
/// let x = DecimalValue::decompose(0.11).unwrap();
/// assert_eq!(x.mantissa(), 11);
/// assert_eq!(x.scale(), 100);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecimalValue {
    mantissa: i128,
    decimals: u32,
}

impl DecimalValue {
    /// Zero with scale 1
    pub const ZERO: Self = Self {
        mantissa: 0,
        decimals: 0,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a mantissa and a number of decimal places.
    ///
    /// # Errors
    /// Returns `Overflow` if `decimals` exceeds [`MAX_DECIMALS`].
    #[inline]
    pub fn new(mantissa: i128, decimals: u32) -> NumericResult<Self> {
        if decimals > MAX_DECIMALS {
            return Err(NumericError::Overflow);
        }
        Ok(Self { mantissa, decimals })
    }

    /// Create an integral value (scale 1).
    #[inline]
    pub const fn from_integer(value: i128) -> Self {
        Self {
            mantissa: value,
            decimals: 0,
        }
    }

    /// Decompose a finite f64 into its exact mantissa/scale pair.
    ///
    /// Integral values keep scale 1. Anything else is rendered through the
    /// normalizer and the digits after the point fix the scale; the
    /// mantissa is read from that same digit string, which equals
    /// `round(value * scale)` without a second pass through float math.
    ///
    /// # Errors
    /// - `NonFinite` for NaN and infinities
    /// - `Overflow` if the mantissa or scale leaves the i128 range
    pub fn decompose(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NonFinite);
        }

        if value.fract() == 0.0 {
            if value.abs() >= I128_BOUND {
                return Err(NumericError::Overflow);
            }
            return Ok(Self::from_integer(value as i128));
        }

        let plain = normalizer::to_plain_string(value)?;
        Self::parse_plain(&plain)
    }

    /// Parse a plain (non-scientific) decimal string.
    fn parse_plain(plain: &str) -> NumericResult<Self> {
        let (negative, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, plain),
        };

        let (int_str, frac_str) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidOperand(plain.to_string()));
        }

        let decimals = normalizer::count_fraction_digits(unsigned) as u32;
        if decimals > MAX_DECIMALS {
            return Err(NumericError::Overflow);
        }

        let mut digits = String::with_capacity(int_str.len() + frac_str.len());
        digits.push_str(int_str);
        digits.push_str(frac_str);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidOperand(plain.to_string()));
        }

        let magnitude: i128 = digits.parse().map_err(|_| NumericError::Overflow)?;
        let mantissa = if negative { -magnitude } else { magnitude };

        Ok(Self { mantissa, decimals })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Integer numerator.
    #[inline]
    pub const fn mantissa(self) -> i128 {
        self.mantissa
    }

    /// Number of decimal places, i.e. log10 of the scale.
    #[inline]
    pub const fn decimals(self) -> u32 {
        self.decimals
    }

    /// Power-of-ten denominator. Never fails: `decimals <= MAX_DECIMALS`.
    #[inline]
    pub fn scale(self) -> i128 {
        10_i128.pow(self.decimals)
    }

    /// True when the quantity has no fractional part.
    #[inline]
    pub fn is_integer(self) -> bool {
        self.mantissa % self.scale() == 0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.mantissa == 0
    }

    // ========================================================================
    // Rescaling
    // ========================================================================

    /// Re-express at a larger number of decimal places.
    ///
    /// Because both scales are powers of ten the mantissa is multiplied by
    /// an exact integer ratio.
    ///
    /// # Errors
    /// - `Overflow` if the widened mantissa leaves the i128 range
    /// - `InvalidOperand` if `decimals` is smaller than the current places
    pub fn rescale(self, decimals: u32) -> NumericResult<Self> {
        if decimals < self.decimals {
            return Err(NumericError::InvalidOperand(format!(
                "cannot narrow {} decimals to {}",
                self.decimals, decimals
            )));
        }
        let ratio = pow10(decimals - self.decimals)?;
        let mantissa = self
            .mantissa
            .checked_mul(ratio)
            .ok_or(NumericError::Overflow)?;
        Self::new(mantissa, decimals)
    }

    /// Divide by `10^places` without touching the mantissa.
    #[inline]
    pub fn shift_right(self, places: u32) -> NumericResult<Self> {
        let decimals = self
            .decimals
            .checked_add(places)
            .ok_or(NumericError::Overflow)?;
        Self::new(self.mantissa, decimals)
    }

    /// Drop trailing zero decimals.
    pub fn normalize(self) -> Self {
        let mut value = self;
        while value.decimals > 0 && value.mantissa % 10 == 0 {
            value.mantissa /= 10;
            value.decimals -= 1;
        }
        value
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Nearest f64 to the exact quotient.
    ///
    /// Goes through the plain decimal text so the standard library's
    /// correctly rounded parser picks the result (3/10 becomes 0.3).
    pub fn to_f64(self) -> NumericResult<f64> {
        let text = self.to_string();
        text.parse::<f64>()
            .map_err(|_| NumericError::InvalidOperand(text))
    }

    /// Convert to `rust_decimal::Decimal` for API boundaries.
    ///
    /// # Errors
    /// Returns `Overflow` beyond 28 decimals or a 96-bit mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        rust_decimal::Decimal::try_from_i128_with_scale(self.mantissa, self.decimals)
            .map_err(|_| NumericError::Overflow)
    }

    /// Convert from `rust_decimal::Decimal`; always exact.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        Self {
            mantissa: d.mantissa(),
            decimals: d.scale(),
        }
    }
}

impl Default for DecimalValue {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<rust_decimal::Decimal> for DecimalValue {
    fn from(d: rust_decimal::Decimal) -> Self {
        Self::from_decimal(d)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecimalValue({}, mantissa={}, scale=10^{})",
            self, self.mantissa, self.decimals
        )
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.mantissa);
        }

        let scale = self.scale();
        let int_part = self.mantissa / scale;
        let frac_part = (self.mantissa % scale).unsigned_abs();
        let width = self.decimals as usize;

        if self.mantissa < 0 && int_part == 0 {
            // Handle -0.xxx case
            write!(f, "-0.{:0>width$}", frac_part, width = width)
        } else {
            write!(f, "{}.{:0>width$}", int_part, frac_part, width = width)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
