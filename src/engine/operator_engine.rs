// ============================================================================
// Operator Engine
// Integer-domain algorithms for add, subtract, multiply, divide and mod
// ============================================================================

use crate::domain::{EngineConfig, Operand, Operation, SubtractMode};
use crate::numeric::{pow10, DecimalValue, NumericError, NumericResult};

/// Evaluates one binary step on exact mantissa/scale pairs.
///
/// Both operands are resolved (percent literals first), decomposed into
/// [`DecimalValue`]s and combined with integer arithmetic. The result is
/// converted back to the nearest f64 only once, at the end.
///
/// # Example
/// ```
/// use decimal_chain::prelude::*;
///
/// let engine = OperatorEngine::default();
/// let sum = engine
///     .evaluate(&Operand::from(0.1), &Operand::from(0.2), Operation::Add)
///     .unwrap();
/// assert_eq!(sum, 0.3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OperatorEngine {
    config: EngineConfig,
}

impl OperatorEngine {
    /// Create an engine after validating its configuration
    pub fn new(config: EngineConfig) -> NumericResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply `operation` to `lhs` and `rhs`.
    ///
    /// Division and remainder by zero keep native float semantics
    /// (infinity or NaN) and are not reported as errors.
    ///
    /// Mantissas that leave the i128 range are carried on in f64, so very
    /// large or very small magnitudes round like native arithmetic instead
    /// of failing.
    ///
    /// # Errors
    /// - `NonFinite` if an operand is NaN or infinite
    /// - `DivisionRetryLimit` if divide exceeds the configured depth
    pub fn evaluate(
        &self,
        lhs: &Operand,
        rhs: &Operand,
        operation: Operation,
    ) -> NumericResult<f64> {
        self.evaluate_at_depth(lhs, rhs, operation, 0)
    }

    /// Decompose an operand, resolving percent literals first.
    pub fn decompose(&self, operand: &Operand) -> NumericResult<DecimalValue> {
        DecimalValue::decompose(self.resolve(operand)?)
    }

    pub(super) fn evaluate_at_depth(
        &self,
        lhs: &Operand,
        rhs: &Operand,
        operation: Operation,
        depth: u8,
    ) -> NumericResult<f64> {
        let lhs_value = self.resolve(lhs)?;
        let rhs_value = self.resolve(rhs)?;

        match self.evaluate_exact(lhs_value, rhs_value, operation, depth) {
            Err(NumericError::Overflow) => {
                tracing::trace!(
                    %operation,
                    lhs_value,
                    rhs_value,
                    "outside the i128 range, using f64 mantissas"
                );
                self.evaluate_scaled(lhs_value, rhs_value, operation, depth)
            },
            result => result,
        }
    }

    fn evaluate_exact(
        &self,
        lhs_value: f64,
        rhs_value: f64,
        operation: Operation,
        depth: u8,
    ) -> NumericResult<f64> {
        let a = DecimalValue::decompose(lhs_value)?;
        let b = DecimalValue::decompose(rhs_value)?;

        tracing::trace!(%operation, ?a, ?b, depth, "evaluating operator");

        match operation {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
            Operation::Divide => self.divide(a, b, depth),
            Operation::Mod => self.modulo(a, b, rhs_value),
        }
    }

    // ========================================================================
    // Operator Algorithms
    // ========================================================================

    fn add(&self, a: DecimalValue, b: DecimalValue) -> NumericResult<f64> {
        let (x, y, decimals) = align(a, b)?;
        let sum = x.checked_add(y).ok_or(NumericError::Overflow)?;
        DecimalValue::new(sum, decimals)?.to_f64()
    }

    fn subtract(&self, a: DecimalValue, b: DecimalValue) -> NumericResult<f64> {
        let (x, y, decimals) = align(a, b)?;

        let combined = if a.decimals() == b.decimals() {
            x.checked_sub(y)
        } else {
            match self.config.subtract_mode {
                SubtractMode::Corrected => x.checked_sub(y),
                SubtractMode::Legacy => {
                    tracing::trace!(?a, ?b, "legacy subtract adds misaligned operands");
                    x.checked_add(y)
                },
            }
        };

        let combined = combined.ok_or(NumericError::Overflow)?;
        DecimalValue::new(combined, decimals)?.to_f64()
    }

    fn multiply(&self, a: DecimalValue, b: DecimalValue) -> NumericResult<f64> {
        let product = a
            .mantissa()
            .checked_mul(b.mantissa())
            .ok_or(NumericError::Overflow)?;
        let decimals = a
            .decimals()
            .checked_add(b.decimals())
            .ok_or(NumericError::Overflow)?;
        DecimalValue::new(product, decimals)?.to_f64()
    }

    /// `(M1 / M2) * (S2 / S1)`, falling back to multiply on the native
    /// ratios when either quotient is fractional.
    fn divide(&self, a: DecimalValue, b: DecimalValue, depth: u8) -> NumericResult<f64> {
        if b.is_zero() {
            return Ok(a.mantissa() as f64 / 0.0);
        }

        let scale_ratio = if b.decimals() >= a.decimals() {
            DecimalValue::from_integer(pow10(b.decimals() - a.decimals())?)
        } else {
            DecimalValue::new(1, a.decimals() - b.decimals())?
        };

        let remainder = a
            .mantissa()
            .checked_rem(b.mantissa())
            .ok_or(NumericError::Overflow)?;

        if remainder == 0 && scale_ratio.is_integer() {
            let quotient = a
                .mantissa()
                .checked_div(b.mantissa())
                .ok_or(NumericError::Overflow)?;
            let result = quotient
                .checked_mul(scale_ratio.mantissa())
                .ok_or(NumericError::Overflow)?;
            return DecimalValue::from_integer(result).to_f64();
        }

        if depth >= self.config.max_divide_depth {
            tracing::warn!(depth, ?a, ?b, "divide retry limit reached");
            return Err(NumericError::DivisionRetryLimit { depth });
        }

        // Multiply never recurses, so this terminates after one retry
        let quotient = a.mantissa() as f64 / b.mantissa() as f64;
        self.evaluate_at_depth(
            &Operand::Number(quotient),
            &Operand::Number(scale_ratio.to_f64()?),
            Operation::Multiply,
            depth + 1,
        )
    }

    /// `(M1 mod (divisor * maxScale)) / maxScale` with the raw divisor,
    /// not its mantissa.
    fn modulo(&self, a: DecimalValue, b: DecimalValue, divisor: f64) -> NumericResult<f64> {
        let decimals = a.decimals().max(b.decimals());
        let scale = pow10(decimals)? as f64;
        let remainder = (a.mantissa() as f64) % (divisor * scale);

        if !remainder.is_finite() {
            return Ok(remainder);
        }

        DecimalValue::decompose(remainder)?
            .shift_right(decimals)?
            .to_f64()
    }
}

/// Bring both mantissas to the larger of the two scales.
fn align(a: DecimalValue, b: DecimalValue) -> NumericResult<(i128, i128, u32)> {
    let decimals = a.decimals().max(b.decimals());
    Ok((
        a.rescale(decimals)?.mantissa(),
        b.rescale(decimals)?.mantissa(),
        decimals,
    ))
}

// ============================================================================
// Tests
// ============================================================================
