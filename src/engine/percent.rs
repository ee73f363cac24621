// ============================================================================
// Percent Resolver
// Turns percent literals into plain values through the engine's divide
// ============================================================================

use super::operator_engine::OperatorEngine;
use crate::domain::{Operand, Operation};
use crate::numeric::NumericResult;

/// A percent literal is divided by this to obtain its value
const PERCENT_DIVISOR: f64 = 100.0;

impl OperatorEngine {
    /// Numeric value of an operand; percent literals are resolved.
    pub fn resolve(&self, operand: &Operand) -> NumericResult<f64> {
        match *operand {
            Operand::Number(value) => Ok(value),
            Operand::Percent(literal) => self.resolve_percent(literal),
        }
    }

    /// `literal / 100` computed with the divide algorithm, so `"0.3%"`
    /// becomes exactly `0.003` rather than a float quotient.
    pub fn resolve_percent(&self, literal: f64) -> NumericResult<f64> {
        self.evaluate_at_depth(
            &Operand::Number(literal),
            &Operand::Number(PERCENT_DIVISOR),
            Operation::Divide,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineConfig;
    use crate::numeric::NumericError;

    #[test]
    fn test_resolve_percent() {
        let engine = OperatorEngine::default();
        assert_eq!(engine.resolve_percent(50.0).unwrap(), 0.5);
        assert_eq!(engine.resolve_percent(12.5).unwrap(), 0.125);
        assert_eq!(engine.resolve_percent(0.3).unwrap(), 0.003);
        assert_eq!(engine.resolve_percent(200.0).unwrap(), 2.0);
        assert_eq!(engine.resolve_percent(-7.0).unwrap(), -0.07);
    }

    #[test]
    fn test_resolve_plain_number_untouched() {
        let engine = OperatorEngine::default();
        assert_eq!(engine.resolve(&Operand::Number(0.1)).unwrap(), 0.1);
        assert_eq!(engine.resolve(&Operand::Percent(1.0)).unwrap(), 0.01);
    }

    #[test]
    fn test_percent_operands_in_arithmetic() {
        let engine = OperatorEngine::default();
        let half = "50%".parse::<Operand>().unwrap();
        let result = engine
            .evaluate(&half, &Operand::Number(200.0), Operation::Multiply)
            .unwrap();
        assert_eq!(result, 100.0);

        let sum = engine
            .evaluate(&Operand::Number(1.0), &Operand::Percent(10.0), Operation::Add)
            .unwrap();
        assert_eq!(sum, 1.1);
    }

    #[test]
    fn test_percent_fails_without_divide_retries() {
        let config = EngineConfig::default().with_max_divide_depth(0);
        let engine = OperatorEngine::new(config).unwrap();
        assert_eq!(
            engine.resolve_percent(50.0),
            Err(NumericError::DivisionRetryLimit { depth: 0 })
        );
        // Whole multiples of 100 divide without a retry
        assert_eq!(engine.resolve_percent(300.0).unwrap(), 3.0);
    }
}
