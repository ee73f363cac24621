// ============================================================================
// Operand
// Plain numbers and percent literals, tagged once at the input boundary
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Percent marker recognised at the end of a literal
pub const PERCENT_MARKER: char = '%';

/// A value handed to the engine.
///
/// Strings are classified when parsed; nothing downstream inspects text.
/// `Percent(50.0)` stands for `"50%"` and resolves to 0.5 through the
/// engine's divide algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// Plain numeric value
    Number(f64),
    /// Percent literal, stored without the marker
    Percent(f64),
}

impl Operand {
    #[inline]
    pub const fn is_percent(&self) -> bool {
        matches!(self, Operand::Percent(_))
    }

    /// The number as written, without percent resolution.
    #[inline]
    pub const fn literal(&self) -> f64 {
        match self {
            Operand::Number(value) | Operand::Percent(value) => *value,
        }
    }

    /// Parse a batch of literals such as `["50%", "200"]`.
    ///
    /// # Errors
    /// Returns the first `InvalidOperand` encountered.
    pub fn parse_all<I, S>(literals: I) -> NumericResult<Vec<Operand>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        literals.into_iter().map(|s| s.as_ref().parse()).collect()
    }
}

fn parse_finite(literal: &str, raw: &str) -> NumericResult<f64> {
    let literal = literal.trim();
    if literal.is_empty() {
        return Err(NumericError::InvalidOperand(raw.to_string()));
    }
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NumericError::InvalidOperand(raw.to_string())),
    }
}

impl FromStr for Operand {
    type Err = NumericError;

    /// Parse a literal.
    ///
    /// # Examples
    /// - "12.5%" -> Percent(12.5)
    /// - "-0.1" -> Number(-0.1)
    /// - "%" -> InvalidOperand
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_suffix(PERCENT_MARKER) {
            Some(literal) => parse_finite(literal, s).map(Operand::Percent),
            None => parse_finite(trimmed, s).map(Operand::Number),
        }
    }
}

impl TryFrom<&str> for Operand {
    type Error = NumericError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Operand {
    type Error = NumericError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<f32> for Operand {
    fn from(value: f32) -> Self {
        Operand::Number(value as f64)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Number(value as f64)
    }
}

impl From<u32> for Operand {
    fn from(value: u32) -> Self {
        Operand::Number(value as f64)
    }
}

impl From<&Operand> for Operand {
    fn from(value: &Operand) -> Self {
        *value
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal())?;
        if self.is_percent() {
            write!(f, "{}", PERCENT_MARKER)?;
        }
        Ok(())
    }
}
