// ============================================================================
// Scaled Float
// f64 mantissa / power-of-ten pairs for magnitudes past the i128 range
// ============================================================================

use super::decimal_value::DecimalValue;
use super::errors::{NumericError, NumericResult};
use super::normalizer;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Correctly rounded `10^n`; infinite once `n` passes 308.
pub fn pow10_f64(n: u32) -> f64 {
    format!("1e{}", n).parse().unwrap_or(f64::INFINITY)
}

/// Integer-valued f64 mantissa over a power-of-ten scale.
///
/// Same split as [`DecimalValue`], carried in native floats so that
/// integers beyond 2^127 and values needing more than
/// [`MAX_DECIMALS`](super::MAX_DECIMALS) places still decompose. Mantissas
/// above 2^53 round like any other f64.
///
/// # Example
/// ```
/// use decimal_chain::numeric::ScaledFloat;
///
/// let x = ScaledFloat::decompose(1e-40).unwrap();
/// assert_eq!(x.mantissa(), 1.0);
/// assert_eq!(x.decimals(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScaledFloat {
    mantissa: f64,
    decimals: u32,
}

impl ScaledFloat {
    #[inline]
    pub const fn new(mantissa: f64, decimals: u32) -> Self {
        Self { mantissa, decimals }
    }

    /// Decompose a finite f64. Integral values keep scale 1.
    ///
    /// # Errors
    /// Returns `NonFinite` for NaN and infinities.
    pub fn decompose(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NonFinite);
        }

        if value.fract() == 0.0 {
            return Ok(Self::new(value, 0));
        }

        let plain = normalizer::to_plain_string(value)?;
        let decimals = u32::try_from(normalizer::count_fraction_digits(&plain))
            .map_err(|_| NumericError::Overflow)?;
        let digits: String = plain.chars().filter(|&c| c != '.').collect();
        let mantissa = digits
            .parse::<f64>()
            .map_err(|_| NumericError::InvalidOperand(plain.clone()))?;

        Ok(Self::new(mantissa, decimals))
    }

    #[inline]
    pub const fn mantissa(self) -> f64 {
        self.mantissa
    }

    #[inline]
    pub const fn decimals(self) -> u32 {
        self.decimals
    }

    #[inline]
    pub fn scale(self) -> f64 {
        pow10_f64(self.decimals)
    }

    /// Nearest f64 to `mantissa / 10^decimals`, rounded once.
    ///
    /// Non-finite mantissas pass through unchanged.
    pub fn to_f64(self) -> NumericResult<f64> {
        if !self.mantissa.is_finite() {
            return Ok(self.mantissa);
        }
        let text = format!("{}e-{}", self.mantissa, self.decimals);
        text.parse::<f64>()
            .map_err(|_| NumericError::InvalidOperand(text))
    }
}

impl From<DecimalValue> for ScaledFloat {
    fn from(value: DecimalValue) -> Self {
        Self::new(value.mantissa() as f64, value.decimals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10_f64(0), 1.0);
        assert_eq!(pow10_f64(21), 1e21);
        assert_eq!(pow10_f64(40), 1e40);
        assert_eq!(pow10_f64(400), f64::INFINITY);
    }

    #[test]
    fn test_large_integers_keep_unit_scale() {
        let x = ScaledFloat::decompose(1e39).unwrap();
        assert_eq!((x.mantissa(), x.decimals()), (1e39, 0));

        let y = ScaledFloat::decompose(-3.5e200).unwrap();
        assert_eq!((y.mantissa(), y.scale()), (-3.5e200, 1.0));
    }

    #[test]
    fn test_tiny_fractions() {
        let x = ScaledFloat::decompose(1e-40).unwrap();
        assert_eq!((x.mantissa(), x.decimals()), (1.0, 40));
        assert_eq!(x.to_f64().unwrap(), 1e-40);

        let y = ScaledFloat::decompose(-1.25e-45).unwrap();
        assert_eq!((y.mantissa(), y.decimals()), (-125.0, 47));
        assert_eq!(y.to_f64().unwrap(), -1.25e-45);
    }

    #[test]
    fn test_matches_exact_decomposition() {
        let exact = DecimalValue::decompose(12.345).unwrap();
        assert_eq!(ScaledFloat::from(exact), ScaledFloat::decompose(12.345).unwrap());
    }

    #[test]
    fn test_to_f64_rounds_once() {
        assert_eq!(ScaledFloat::new(375.0, 42).to_f64().unwrap(), 3.75e-40);
        assert_eq!(ScaledFloat::new(3.0, 1).to_f64().unwrap(), 0.3);
        assert_eq!(ScaledFloat::new(f64::INFINITY, 2).to_f64().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(ScaledFloat::decompose(f64::NAN), Err(NumericError::NonFinite));
    }
}
