// ============================================================================
// Scaled Arithmetic
// The operator algorithms on f64 mantissas, for values past the i128 range
// ============================================================================

use super::operator_engine::OperatorEngine;
use crate::domain::{Operand, Operation, SubtractMode};
use crate::numeric::{pow10_f64, NumericError, NumericResult, ScaledFloat};

impl OperatorEngine {
    /// Same algorithms as the exact path with f64 mantissas. Results are
    /// rescaled through [`ScaledFloat::to_f64`] so the final division by
    /// the scale rounds once.
    pub(super) fn evaluate_scaled(
        &self,
        lhs_value: f64,
        rhs_value: f64,
        operation: Operation,
        depth: u8,
    ) -> NumericResult<f64> {
        let a = ScaledFloat::decompose(lhs_value)?;
        let b = ScaledFloat::decompose(rhs_value)?;

        tracing::trace!(%operation, ?a, ?b, depth, "evaluating scaled operator");

        match operation {
            Operation::Add => {
                let (x, y, decimals) = align_scaled(a, b);
                ScaledFloat::new(x + y, decimals).to_f64()
            },
            Operation::Subtract => {
                let (x, y, decimals) = align_scaled(a, b);
                let combined = if a.decimals() == b.decimals()
                    || self.config().subtract_mode == SubtractMode::Corrected
                {
                    x - y
                } else {
                    x + y
                };
                ScaledFloat::new(combined, decimals).to_f64()
            },
            Operation::Multiply => {
                let decimals = a
                    .decimals()
                    .checked_add(b.decimals())
                    .ok_or(NumericError::Overflow)?;
                ScaledFloat::new(a.mantissa() * b.mantissa(), decimals).to_f64()
            },
            Operation::Divide => self.divide_scaled(a, b, depth),
            Operation::Mod => {
                let decimals = a.decimals().max(b.decimals());
                let remainder = a.mantissa() % (rhs_value * pow10_f64(decimals));
                ScaledFloat::new(remainder, decimals).to_f64()
            },
        }
    }

    fn divide_scaled(&self, a: ScaledFloat, b: ScaledFloat, depth: u8) -> NumericResult<f64> {
        if b.mantissa() == 0.0 {
            return Ok(a.mantissa() / 0.0);
        }

        let quotient = a.mantissa() / b.mantissa();
        let scale_ratio = if b.decimals() >= a.decimals() {
            ScaledFloat::new(pow10_f64(b.decimals() - a.decimals()), 0)
        } else {
            ScaledFloat::new(1.0, a.decimals() - b.decimals())
        };

        if quotient.fract() == 0.0 && scale_ratio.decimals() == 0 {
            return Ok(quotient * scale_ratio.mantissa());
        }

        if depth >= self.config().max_divide_depth {
            tracing::warn!(depth, ?a, ?b, "divide retry limit reached");
            return Err(NumericError::DivisionRetryLimit { depth });
        }

        self.evaluate_at_depth(
            &Operand::Number(quotient),
            &Operand::Number(scale_ratio.to_f64()?),
            Operation::Multiply,
            depth + 1,
        )
    }
}

/// Bring both f64 mantissas to the larger of the two scales.
fn align_scaled(a: ScaledFloat, b: ScaledFloat) -> (f64, f64, u32) {
    if a.decimals() >= b.decimals() {
        let ratio = pow10_f64(a.decimals() - b.decimals());
        (a.mantissa(), b.mantissa() * ratio, a.decimals())
    } else {
        let ratio = pow10_f64(b.decimals() - a.decimals());
        (a.mantissa() * ratio, b.mantissa(), b.decimals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineConfig;

    fn eval(lhs: f64, rhs: f64, operation: Operation) -> f64 {
        OperatorEngine::default()
            .evaluate(&Operand::Number(lhs), &Operand::Number(rhs), operation)
            .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-15;
        assert!(
            (actual - expected).abs() <= tolerance,
            "{} is not within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_product_past_i128() {
        assert_eq!(eval(1e20, 1e20, Operation::Multiply), 1e40);
        assert_eq!(eval(1e39, 2.0, Operation::Multiply), 2e39);
    }

    #[test]
    fn test_product_past_max_decimals() {
        // 375 over 10^42 is exact, only the scale left the i128 range
        assert_eq!(eval(1.5e-20, 2.5e-20, Operation::Multiply), 3.75e-40);
    }

    #[test]
    fn test_huge_integers_add() {
        assert_eq!(eval(1e39, 1.0, Operation::Add), 1e39);
        assert_eq!(eval(-1e39, 1e39, Operation::Add), 0.0);
    }

    #[test]
    fn test_tiny_fractions_add() {
        assert_eq!(eval(1e-40, 0.0, Operation::Add), 1e-40);
        assert_eq!(eval(1e-40, 2e-40, Operation::Add), 3e-40);
    }

    #[test]
    fn test_alignment_overflow_falls_back() {
        // 1e37 widened by 100 leaves the i128 range
        assert_close(eval(1e37, 0.01, Operation::Add), 1e37);
    }

    #[test]
    fn test_subtract_modes() {
        assert_eq!(eval(3e-40, 1e-40, Operation::Subtract), 2e-40);
        // Misaligned scales add in legacy mode
        assert_close(eval(1e-40, 1e-41, Operation::Subtract), 1.1e-40);

        let corrected = OperatorEngine::new(EngineConfig::corrected()).unwrap();
        let result = corrected
            .evaluate(
                &Operand::Number(1e-40),
                &Operand::Number(1e-41),
                Operation::Subtract,
            )
            .unwrap();
        assert_close(result, 9e-41);
    }

    #[test]
    fn test_divide() {
        assert_eq!(eval(1e40, 1e20, Operation::Divide), 1e20);
        assert_close(eval(1e-40, 4.0, Operation::Divide), 2.5e-41);
        assert_eq!(eval(1e39, 0.0, Operation::Divide), f64::INFINITY);
    }

    #[test]
    fn test_divide_retry_limit() {
        let engine = OperatorEngine::new(EngineConfig::default().with_max_divide_depth(0)).unwrap();
        let result = engine.evaluate(
            &Operand::Number(1e-40),
            &Operand::Number(3.0),
            Operation::Divide,
        );
        assert_eq!(result, Err(NumericError::DivisionRetryLimit { depth: 0 }));
    }

    #[test]
    fn test_mod() {
        assert_eq!(eval(1e39, 7.0, Operation::Mod), 1e39 % 7.0);
        assert!(eval(1e39, 0.0, Operation::Mod).is_nan());
    }

    #[test]
    fn test_direct_scaled_path_matches_exact_path() {
        let engine = OperatorEngine::default();
        for operation in Operation::ALL {
            assert_eq!(
                engine.evaluate_scaled(0.5, 0.25, operation, 0).unwrap(),
                eval(0.5, 0.25, operation)
            );
        }
    }
}
